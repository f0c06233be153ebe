use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Ambient preference unavailable: {0}")]
    AmbientQueryUnavailable(String),

    #[error("Unrecognized preference value: {0}")]
    InvalidValue(String),

    #[error("Config error: {0}")]
    Config(String),
}
