//! Light/dark display preference: resolution, persistence and reconciliation
//! with the host color scheme.

pub mod error;
pub mod memory;
pub mod ports;
pub mod store;
pub mod types;

pub use error::PreferenceError;
pub use ports::{AmbientListener, AmbientSource, DisplayFlag, PreferenceStorage, Subscription};
pub use store::PreferenceStore;
pub use types::{Preference, Source};
