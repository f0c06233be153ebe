//! Collaborators the preference store is built from.
//!
//! Browser implementations live in `crate::browser`; in-memory ones in
//! [`super::memory`].

use super::error::PreferenceError;
use super::types::Preference;

/// Durable key-value slot holding the persisted choice as a raw string.
pub trait PreferenceStorage {
    fn load(&self) -> Result<Option<String>, PreferenceError>;
    fn save(&self, value: &str) -> Result<(), PreferenceError>;
}

pub type AmbientListener = Box<dyn Fn(Preference)>;

/// Host-reported color scheme.
pub trait AmbientSource {
    /// Samples the ambient preference as of now.
    fn current(&self) -> Result<Preference, PreferenceError>;

    /// Registers `listener` for every later change. Dropping the returned
    /// handle stops delivery.
    fn subscribe(&self, listener: AmbientListener) -> Result<Subscription, PreferenceError>;
}

/// The single page-wide display-mode flag.
pub trait DisplayFlag {
    fn apply(&self, preference: Preference);

    /// `None` until something has been applied.
    fn current(&self) -> Option<Preference>;
}

/// Handle to a registered callback.
///
/// Cancels on [`Subscription::unsubscribe`] or on drop. Use
/// [`Subscription::forget`] for listeners that live as long as the page.
#[must_use = "dropping a Subscription cancels it"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keeps the callback registered for good. Whatever the cancel closure
    /// owns (for example a JS closure) is leaked along with it.
    pub fn forget(mut self) {
        if let Some(cancel) = self.cancel.take() {
            std::mem::forget(cancel);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
