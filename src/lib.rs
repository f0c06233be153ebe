pub mod browser;
pub mod components;
pub mod config;
pub mod preference;
pub mod theme;

pub use config::ThemeConfig;
pub use preference::{Preference, PreferenceError, PreferenceStore};
pub use theme::ThemeRuntime;
