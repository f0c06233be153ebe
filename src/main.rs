use robrac_site::config::{ThemeConfig, CONFIG_ELEMENT_ID};
use robrac_site::ThemeRuntime;
use tracing::warn;

fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = ThemeConfig::from_document(CONFIG_ELEMENT_ID).unwrap_or_else(|e| {
        warn!("Using default theme config: {}", e);
        ThemeConfig::default()
    });

    let runtime = ThemeRuntime::start(&config);
    runtime.bind_toggles(&config);
    runtime.mount_toggles(&config);
    runtime.keep_alive();
}
