use crate::preference::{PreferenceError, PreferenceStorage};

use super::js_error;

/// A single `localStorage` entry.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    key: String,
}

impl LocalStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    // Private browsing and disabled storage surface here as errors or `None`.
    fn storage(&self) -> Result<web_sys::Storage, PreferenceError> {
        let window = web_sys::window()
            .ok_or_else(|| PreferenceError::StorageUnavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| PreferenceError::StorageUnavailable(js_error(e)))?
            .ok_or_else(|| PreferenceError::StorageUnavailable("localStorage disabled".to_string()))
    }
}

impl PreferenceStorage for LocalStorage {
    fn load(&self) -> Result<Option<String>, PreferenceError> {
        self.storage()?
            .get_item(&self.key)
            .map_err(|e| PreferenceError::StorageUnavailable(js_error(e)))
    }

    fn save(&self, value: &str) -> Result<(), PreferenceError> {
        self.storage()?
            .set_item(&self.key, value)
            .map_err(|e| PreferenceError::StorageUnavailable(js_error(e)))
    }
}
