use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::PreferenceError;

/// The two display modes a page can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    #[default]
    Light,
    Dark,
}

impl Preference {
    /// The literal stored in durable storage and written to the display flag.
    pub fn as_str(self) -> &'static str {
        match self {
            Preference::Light => "light",
            Preference::Dark => "dark",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Preference::Light => Preference::Dark,
            Preference::Dark => Preference::Light,
        }
    }

    /// Maps a `prefers-color-scheme: dark` match result onto a preference.
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            Preference::Dark
        } else {
            Preference::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Preference::Dark
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preference {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Preference::Light),
            "dark" => Ok(Preference::Dark),
            other => Err(PreferenceError::InvalidValue(other.to_string())),
        }
    }
}

/// Where the resolved preference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Persisted,
    Ambient,
    Fallback,
}
