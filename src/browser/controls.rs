//! Behavior attached to toggle controls already present in the page.

use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::preference::Preference;

use super::js_error;

const SPIN: &str = "rotate(360deg)";

/// `aria-pressed` value for a dark-mode toggle.
pub fn aria_pressed(preference: Preference) -> &'static str {
    if preference.is_dark() {
        "true"
    } else {
        "false"
    }
}

pub fn set_pressed(control: &web_sys::HtmlElement, preference: Preference) {
    if let Err(e) = control.set_attribute("aria-pressed", aria_pressed(preference)) {
        warn!("Failed to set aria-pressed: {}", js_error(e));
    }
}

/// Rotates `control` one full turn and clears the transform after `spin_ms`.
pub fn spin(control: &web_sys::HtmlElement, spin_ms: i32) {
    let _ = control.style().set_property("transform", SPIN);

    let target = control.clone();
    let reset = Closure::once(move || {
        let _ = target.style().set_property("transform", "");
    });
    if let Some(window) = web_sys::window() {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            reset.as_ref().unchecked_ref(),
            spin_ms,
        );
    }
    reset.forget();
}

/// Runs `on_click` for every click on `control` for the life of the page.
pub fn on_click(control: &web_sys::HtmlElement, on_click: impl FnMut() + 'static) -> bool {
    let callback = Closure::<dyn FnMut()>::new(on_click);
    match control.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref()) {
        Ok(()) => {
            callback.forget();
            true
        }
        Err(e) => {
            warn!("Failed to bind toggle control: {}", js_error(e));
            false
        }
    }
}

/// Every `HtmlElement` matching `selector`, or none if the selector is
/// invalid.
pub fn query_all(selector: &str) -> Vec<web_sys::HtmlElement> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return Vec::new();
    };
    let nodes = match document.query_selector_all(selector) {
        Ok(nodes) => nodes,
        Err(_) => {
            warn!("Invalid selector: {}", selector);
            return Vec::new();
        }
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aria_pressed_tracks_dark() {
        assert_eq!(aria_pressed(Preference::Dark), "true");
        assert_eq!(aria_pressed(Preference::Light), "false");
    }
}
