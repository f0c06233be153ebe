use serde::{Deserialize, Serialize};

use crate::preference::{Preference, PreferenceError};

/// Id of the optional `<script type="application/json">` element carrying
/// page overrides.
pub const CONFIG_ELEMENT_ID: &str = "theme-config";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// `localStorage` key holding the explicit choice.
    pub storage_key: String,
    /// Attribute on `<html>` the resolved preference is written to.
    pub attribute: String,
    /// Media query whose match means the host prefers dark.
    pub media_query: String,
    /// Used when the host cannot report a preference.
    pub fallback: Preference,
    /// Existing controls that toggle the preference when clicked.
    pub toggle_selector: String,
    /// Optional selector for empty hosts a toggle button is rendered into.
    pub toggle_slot: Option<String>,
    /// Length of the toggle's rotation, in milliseconds.
    pub spin_ms: i32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            attribute: "data-theme".to_string(),
            media_query: "(prefers-color-scheme: dark)".to_string(),
            fallback: Preference::Light,
            toggle_selector: ".theme-toggle".to_string(),
            toggle_slot: None,
            spin_ms: 300,
        }
    }
}

impl ThemeConfig {
    pub fn from_json(raw: &str) -> Result<Self, PreferenceError> {
        serde_json::from_str(raw).map_err(|e| PreferenceError::Config(e.to_string()))
    }

    /// Reads overrides from the page. A missing element yields the defaults.
    pub fn from_document(element_id: &str) -> Result<Self, PreferenceError> {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.get_element_by_id(element_id))
            .and_then(|el| el.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Ok(Self::default()),
        }
    }
}
