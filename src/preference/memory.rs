//! In-memory collaborators. Clones share state, so a test can keep a handle
//! while the store owns another, and a "reloaded" store can reuse storage.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::error::PreferenceError;
use super::ports::{AmbientListener, AmbientSource, DisplayFlag, PreferenceStorage, Subscription};
use super::types::Preference;

#[derive(Debug, Default)]
struct StorageSlot {
    value: RefCell<Option<String>>,
    unavailable: Cell<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<StorageSlot>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        let storage = Self::new();
        *storage.slot.value.borrow_mut() = Some(value.to_string());
        storage
    }

    /// Makes every later load and save fail, like a browser with storage
    /// disabled.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.slot.unavailable.set(unavailable);
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.value.borrow().clone()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, PreferenceError> {
        if self.slot.unavailable.get() {
            return Err(PreferenceError::StorageUnavailable("storage disabled".to_string()));
        }
        Ok(self.slot.value.borrow().clone())
    }

    fn save(&self, value: &str) -> Result<(), PreferenceError> {
        if self.slot.unavailable.get() {
            return Err(PreferenceError::StorageUnavailable("storage disabled".to_string()));
        }
        *self.slot.value.borrow_mut() = Some(value.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct AmbientState {
    current: Cell<Option<Preference>>,
    listeners: RefCell<Vec<(u64, Rc<dyn Fn(Preference)>)>>,
    next_id: Cell<u64>,
}

/// Ambient source driven by the test. `None` means the host cannot report a
/// preference.
#[derive(Clone, Default)]
pub struct ManualAmbient {
    state: Rc<AmbientState>,
}

impl ManualAmbient {
    pub fn new(current: Option<Preference>) -> Self {
        let ambient = Self::default();
        ambient.state.current.set(current);
        ambient
    }

    /// Changes the host preference and notifies every live listener.
    pub fn emit(&self, preference: Preference) {
        self.state.current.set(Some(preference));
        let listeners: Vec<Rc<dyn Fn(Preference)>> = self
            .state
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(preference);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }
}

impl AmbientSource for ManualAmbient {
    fn current(&self) -> Result<Preference, PreferenceError> {
        self.state.current.get().ok_or_else(|| {
            PreferenceError::AmbientQueryUnavailable("no ambient preference reported".to_string())
        })
    }

    fn subscribe(&self, listener: AmbientListener) -> Result<Subscription, PreferenceError> {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        self.state
            .listeners
            .borrow_mut()
            .push((id, Rc::from(listener)));

        let state = Rc::downgrade(&self.state);
        Ok(Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                state.listeners.borrow_mut().retain(|(other, _)| *other != id);
            }
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryFlag {
    value: Rc<Cell<Option<Preference>>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `apply` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl DisplayFlag for MemoryFlag {
    fn apply(&self, preference: Preference) {
        self.value.set(Some(preference));
        self.writes.set(self.writes.get() + 1);
    }

    fn current(&self) -> Option<Preference> {
        self.value.get()
    }
}
