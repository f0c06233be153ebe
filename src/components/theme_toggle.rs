use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::browser::controls::aria_pressed;
use crate::theme::SiteStore;

#[component]
pub fn ThemeToggle(
    /// Store the click toggles
    store: Rc<SiteStore>,
    /// How long the rotation lasts, in milliseconds
    spin_ms: i32,
) -> impl IntoView {
    let (preference, set_preference) = signal(store.current().unwrap_or_default());
    let (spinning, set_spinning) = signal(false);

    // Follow ambient changes too, not just our own clicks
    store.flag().observe(move |p| set_preference.set(p));

    let on_click = move |_| {
        store.toggle();

        set_spinning.set(true);
        let reset = wasm_bindgen::closure::Closure::once(move || {
            set_spinning.set(false);
        });
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                reset.as_ref().unchecked_ref(),
                spin_ms,
            );
        }
        reset.forget();
    };

    let is_dark = move || preference.get().is_dark();

    view! {
        <button
            type="button"
            class="theme-toggle"
            title="Alternar tema"
            aria-label="Alternar tema"
            aria-pressed=move || aria_pressed(preference.get())
            style:transform=move || if spinning.get() { "rotate(360deg)" } else { "" }
            on:click=on_click
        >
            {move || if is_dark() { "\u{263E}" } else { "\u{2600}" }}
        </button>
    }
}
