use std::rc::Rc;

use leptos::prelude::*;
use tracing::{info, warn};

use crate::browser::controls;
use crate::browser::{DocumentFlag, LocalStorage, MediaQueryAmbient};
use crate::components::theme_toggle::ThemeToggle;
use crate::config::ThemeConfig;
use crate::preference::{PreferenceStore, Subscription};

pub type SiteStore = PreferenceStore<LocalStorage, MediaQueryAmbient, DocumentFlag>;

/// The page's preference store plus the listeners wired to it.
pub struct ThemeRuntime {
    store: Rc<SiteStore>,
    ambient: Option<Subscription>,
}

impl ThemeRuntime {
    /// Builds the store from `config`, applies the resolved preference to
    /// `<html>` and starts following host color-scheme changes.
    pub fn start(config: &ThemeConfig) -> Self {
        let store = Rc::new(
            PreferenceStore::new(
                LocalStorage::new(&config.storage_key),
                MediaQueryAmbient::new(&config.media_query),
                DocumentFlag::new(&config.attribute),
            )
            .with_fallback(config.fallback),
        );
        store.initialize();

        let ambient = match store.follow_ambient() {
            Ok(subscription) => Some(subscription),
            Err(e) => {
                warn!("Not following host color scheme: {}", e);
                None
            }
        };

        Self { store, ambient }
    }

    pub fn store(&self) -> &Rc<SiteStore> {
        &self.store
    }

    /// Wires click, rotation and `aria-pressed` onto the page's existing
    /// toggle controls. Returns how many were bound.
    pub fn bind_toggles(&self, config: &ThemeConfig) -> usize {
        let mut bound = 0;
        for control in controls::query_all(&config.toggle_selector) {
            if let Some(current) = self.store.current() {
                controls::set_pressed(&control, current);
            }
            let pressed = control.clone();
            self.store
                .flag()
                .observe(move |p| controls::set_pressed(&pressed, p));

            let store = self.store.clone();
            let spun = control.clone();
            let spin_ms = config.spin_ms;
            if controls::on_click(&control, move || {
                store.toggle();
                controls::spin(&spun, spin_ms);
            }) {
                bound += 1;
            }
        }

        info!("Bound {} theme toggle control(s)", bound);
        bound
    }

    /// Renders a [`ThemeToggle`] into every element matching
    /// `config.toggle_slot`, when one is configured. Returns how many were
    /// mounted.
    pub fn mount_toggles(&self, config: &ThemeConfig) -> usize {
        let Some(slot) = config.toggle_slot.as_deref() else {
            return 0;
        };

        let mut mounted = 0;
        for host in controls::query_all(slot) {
            let store = self.store.clone();
            let spin_ms = config.spin_ms;
            leptos::mount::mount_to(host, move || {
                view! { <ThemeToggle store=store spin_ms=spin_ms /> }
            })
            .forget();
            mounted += 1;
        }

        info!("Mounted {} theme toggle(s)", mounted);
        mounted
    }

    /// Keeps the store and its ambient listener for the life of the page.
    pub fn keep_alive(self) {
        if let Some(subscription) = self.ambient {
            subscription.forget();
        }
        std::mem::forget(self.store);
    }
}
