use std::rc::Rc;

use tracing::{debug, info, warn};

use super::error::PreferenceError;
use super::ports::{AmbientSource, DisplayFlag, PreferenceStorage, Subscription};
use super::types::{Preference, Source};

/// Resolves the page's light/dark preference from an explicit persisted
/// choice, falling back to the ambient host preference, and keeps the display
/// flag in sync.
///
/// All operations run to completion on the owning thread. Collaborator errors
/// stop here: a failed storage read counts as "no choice", a failed write only
/// loses durability, and a missing ambient signal resolves to the fallback.
pub struct PreferenceStore<S, A, F> {
    storage: S,
    ambient: A,
    flag: F,
    fallback: Preference,
}

impl<S, A, F> PreferenceStore<S, A, F>
where
    S: PreferenceStorage,
    A: AmbientSource,
    F: DisplayFlag,
{
    pub fn new(storage: S, ambient: A, flag: F) -> Self {
        Self {
            storage,
            ambient,
            flag,
            fallback: Preference::Light,
        }
    }

    /// Preference used when the host cannot report one.
    pub fn with_fallback(mut self, fallback: Preference) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn flag(&self) -> &F {
        &self.flag
    }

    /// The preference currently applied, if `initialize` has run.
    pub fn current(&self) -> Option<Preference> {
        self.flag.current()
    }

    /// The explicit choice in durable storage, read fresh on every call.
    pub fn persisted_choice(&self) -> Option<Preference> {
        let raw = match self.storage.load() {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Treating persisted preference as absent: {}", e);
                return None;
            }
        };
        match raw.parse() {
            Ok(preference) => Some(preference),
            Err(e) => {
                warn!("Ignoring stored preference: {}", e);
                None
            }
        }
    }

    /// Computes the preference that should be in effect right now without
    /// applying it.
    pub fn resolve(&self) -> (Preference, Source) {
        if let Some(choice) = self.persisted_choice() {
            return (choice, Source::Persisted);
        }
        match self.ambient.current() {
            Ok(ambient) => (ambient, Source::Ambient),
            Err(e) => {
                warn!("Using fallback preference {}: {}", self.fallback, e);
                (self.fallback, Source::Fallback)
            }
        }
    }

    pub fn initialize(&self) -> Preference {
        let (preference, source) = self.resolve();
        info!("Resolved display preference {} from {:?}", preference, source);
        self.flag.apply(preference);
        preference
    }

    /// Flips the applied preference and records it as the explicit choice.
    pub fn toggle(&self) -> Preference {
        let current = self.flag.current().unwrap_or_else(|| self.resolve().0);
        let next = current.opposite();

        if let Err(e) = self.storage.save(next.as_str()) {
            warn!("Preference {} applies to this session only: {}", next, e);
        }
        self.flag.apply(next);
        info!("Toggled display preference {} -> {}", current, next);
        next
    }

    /// Applies a new ambient preference unless the user has chosen one.
    /// Returns the applied preference, or `None` when the change was ignored.
    pub fn on_ambient_change(&self, ambient: Preference) -> Option<Preference> {
        if let Some(choice) = self.persisted_choice() {
            debug!(
                "Ignoring ambient change to {}: explicit choice {} wins",
                ambient, choice
            );
            return None;
        }
        self.flag.apply(ambient);
        info!("Applied ambient display preference {}", ambient);
        Some(ambient)
    }
}

impl<S, A, F> PreferenceStore<S, A, F>
where
    S: PreferenceStorage + 'static,
    A: AmbientSource + 'static,
    F: DisplayFlag + 'static,
{
    /// Routes ambient change notifications into [`Self::on_ambient_change`].
    ///
    /// The listener holds a weak reference, so a dropped store stops
    /// reacting even while the subscription is alive.
    pub fn watch_ambient(self: &Rc<Self>) -> Result<Subscription, PreferenceError> {
        let store = Rc::downgrade(self);
        self.ambient.subscribe(Box::new(move |ambient| {
            if let Some(store) = store.upgrade() {
                store.on_ambient_change(ambient);
            }
        }))
    }

    /// Like [`Self::watch_ambient`], but the listener keeps the store alive
    /// on its own. Used for the page-wide store, which has no other owner
    /// once startup returns.
    pub fn follow_ambient(self: &Rc<Self>) -> Result<Subscription, PreferenceError> {
        let store = Rc::clone(self);
        self.ambient.subscribe(Box::new(move |ambient| {
            store.on_ambient_change(ambient);
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preference::memory::{ManualAmbient, MemoryFlag, MemoryStorage};

    type TestStore = PreferenceStore<MemoryStorage, ManualAmbient, MemoryFlag>;

    fn create_test_store(
        stored: Option<&str>,
        ambient: Option<Preference>,
    ) -> (TestStore, MemoryStorage, ManualAmbient, MemoryFlag) {
        let storage = stored.map(MemoryStorage::with_value).unwrap_or_default();
        let ambient = ManualAmbient::new(ambient);
        let flag = MemoryFlag::new();
        let store = PreferenceStore::new(storage.clone(), ambient.clone(), flag.clone());
        (store, storage, ambient, flag)
    }

    #[test]
    fn test_initialize_uses_ambient_without_choice() {
        for ambient in [Preference::Light, Preference::Dark] {
            let (store, storage, _, flag) = create_test_store(None, Some(ambient));
            assert_eq!(store.initialize(), ambient);
            assert_eq!(flag.current(), Some(ambient));
            assert_eq!(storage.raw(), None);
        }
    }

    #[test]
    fn test_initialize_prefers_persisted_choice() {
        let (store, _, _, flag) = create_test_store(Some("dark"), Some(Preference::Light));
        assert_eq!(store.initialize(), Preference::Dark);
        assert_eq!(flag.current(), Some(Preference::Dark));
        assert_eq!(store.resolve().1, Source::Persisted);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (store, _, _, flag) = create_test_store(None, Some(Preference::Dark));
        let first = store.initialize();
        let second = store.initialize();
        assert_eq!(first, second);
        assert_eq!(flag.current(), Some(first));
    }

    #[test]
    fn test_initialize_falls_back_without_ambient() {
        let (store, _, _, flag) = create_test_store(None, None);
        assert_eq!(store.initialize(), Preference::Light);
        assert_eq!(flag.current(), Some(Preference::Light));
        assert_eq!(store.resolve().1, Source::Fallback);
    }

    #[test]
    fn test_custom_fallback() {
        let (store, _, _, _) = create_test_store(None, None);
        let store = store.with_fallback(Preference::Dark);
        assert_eq!(store.initialize(), Preference::Dark);
    }

    #[test]
    fn test_unreadable_storage_counts_as_absent() {
        let (store, storage, _, _) = create_test_store(Some("dark"), Some(Preference::Light));
        storage.set_unavailable(true);
        assert_eq!(store.persisted_choice(), None);
        assert_eq!(store.initialize(), Preference::Light);
    }

    #[test]
    fn test_unrecognized_stored_value_counts_as_absent() {
        let (store, _, _, _) = create_test_store(Some("sepia"), Some(Preference::Dark));
        assert_eq!(store.persisted_choice(), None);
        assert_eq!(store.initialize(), Preference::Dark);
    }

    #[test]
    fn test_toggle_persists_opposite() {
        let (store, storage, _, flag) = create_test_store(None, Some(Preference::Light));
        store.initialize();

        assert_eq!(store.toggle(), Preference::Dark);
        assert_eq!(flag.current(), Some(Preference::Dark));
        assert_eq!(storage.raw().as_deref(), Some("dark"));
    }

    #[test]
    fn test_toggle_before_initialize_starts_from_resolved() {
        let (store, storage, _, flag) = create_test_store(None, Some(Preference::Dark));
        assert_eq!(store.toggle(), Preference::Light);
        assert_eq!(flag.current(), Some(Preference::Light));
        assert_eq!(storage.raw().as_deref(), Some("light"));
    }

    #[test]
    fn test_toggle_with_failed_write_still_applies() {
        let (store, storage, _, flag) = create_test_store(None, Some(Preference::Light));
        store.initialize();
        storage.set_unavailable(true);

        assert_eq!(store.toggle(), Preference::Dark);
        assert_eq!(flag.current(), Some(Preference::Dark));

        storage.set_unavailable(false);
        assert_eq!(storage.raw(), None);
    }

    #[test]
    fn test_ambient_change_applies_without_choice() {
        let (store, _, _, flag) = create_test_store(None, Some(Preference::Light));
        store.initialize();

        assert_eq!(store.on_ambient_change(Preference::Dark), Some(Preference::Dark));
        assert_eq!(flag.current(), Some(Preference::Dark));
    }

    #[test]
    fn test_ambient_change_ignored_after_toggle() {
        let (store, storage, _, flag) = create_test_store(None, Some(Preference::Light));
        store.initialize();
        store.toggle();
        let writes = flag.writes();

        assert_eq!(store.on_ambient_change(Preference::Light), None);
        assert_eq!(store.on_ambient_change(Preference::Dark), None);
        assert_eq!(flag.current(), Some(Preference::Dark));
        assert_eq!(flag.writes(), writes);
        assert_eq!(storage.raw().as_deref(), Some("dark"));
    }

    #[test]
    fn test_ambient_change_never_persists() {
        let (store, storage, _, _) = create_test_store(None, Some(Preference::Light));
        store.initialize();
        store.on_ambient_change(Preference::Dark);
        assert_eq!(storage.raw(), None);
    }

    #[test]
    fn test_watch_ambient_delivers_until_unsubscribed() {
        let (store, _, ambient, flag) = create_test_store(None, Some(Preference::Light));
        let store = Rc::new(store);
        store.initialize();

        let sub = store.watch_ambient().unwrap();
        assert_eq!(ambient.listener_count(), 1);
        ambient.emit(Preference::Dark);
        assert_eq!(flag.current(), Some(Preference::Dark));

        sub.unsubscribe();
        assert_eq!(ambient.listener_count(), 0);
        ambient.emit(Preference::Light);
        assert_eq!(flag.current(), Some(Preference::Dark));
    }

    #[test]
    fn test_watch_ambient_after_store_dropped() {
        let (store, _, ambient, flag) = create_test_store(None, Some(Preference::Light));
        let store = Rc::new(store);
        store.initialize();
        let sub = store.watch_ambient().unwrap();

        drop(store);
        ambient.emit(Preference::Dark);
        assert_eq!(flag.current(), Some(Preference::Light));
        sub.forget();
    }

    #[test]
    fn test_follow_ambient_outlives_last_store_handle() {
        let (store, _, ambient, flag) = create_test_store(None, Some(Preference::Light));
        let store = Rc::new(store);
        store.initialize();
        store.follow_ambient().unwrap().forget();

        // Startup returns without any toggle holding the store
        drop(store);
        ambient.emit(Preference::Dark);
        assert_eq!(flag.current(), Some(Preference::Dark));
    }

    #[test]
    fn test_follow_ambient_stops_on_unsubscribe() {
        let (store, _, ambient, flag) = create_test_store(None, Some(Preference::Light));
        let store = Rc::new(store);
        store.initialize();
        let sub = store.follow_ambient().unwrap();

        sub.unsubscribe();
        assert_eq!(ambient.listener_count(), 0);
        ambient.emit(Preference::Dark);
        assert_eq!(flag.current(), Some(Preference::Light));
    }
}
