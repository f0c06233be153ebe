use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::preference::{AmbientListener, AmbientSource, Preference, PreferenceError, Subscription};

use super::js_error;

/// Host color scheme as reported by `window.matchMedia`.
#[derive(Debug, Clone)]
pub struct MediaQueryAmbient {
    query: String,
}

impl MediaQueryAmbient {
    /// `query` should match when the host prefers dark, e.g.
    /// `(prefers-color-scheme: dark)`.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    fn media_query_list(&self) -> Result<web_sys::MediaQueryList, PreferenceError> {
        let window = web_sys::window()
            .ok_or_else(|| PreferenceError::AmbientQueryUnavailable("no window".to_string()))?;
        window
            .match_media(&self.query)
            .map_err(|e| PreferenceError::AmbientQueryUnavailable(js_error(e)))?
            .ok_or_else(|| {
                PreferenceError::AmbientQueryUnavailable(format!("matchMedia unsupported: {}", self.query))
            })
    }
}

impl AmbientSource for MediaQueryAmbient {
    fn current(&self) -> Result<Preference, PreferenceError> {
        Ok(Preference::from_dark(self.media_query_list()?.matches()))
    }

    fn subscribe(&self, listener: AmbientListener) -> Result<Subscription, PreferenceError> {
        let list = self.media_query_list()?;
        let callback = Closure::<dyn Fn(web_sys::MediaQueryListEvent)>::new(
            move |event: web_sys::MediaQueryListEvent| {
                listener(Preference::from_dark(event.matches()));
            },
        );

        list.add_event_listener_with_callback("change", callback.as_ref().unchecked_ref())
            .map_err(|e| PreferenceError::AmbientQueryUnavailable(js_error(e)))?;

        Ok(Subscription::new(move || {
            if let Err(e) = list
                .remove_event_listener_with_callback("change", callback.as_ref().unchecked_ref())
            {
                warn!("Failed to remove color scheme listener: {}", js_error(e));
            }
        }))
    }
}
