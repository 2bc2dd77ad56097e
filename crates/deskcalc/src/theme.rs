//! Light/dark theme with a persisted preference
//!
//! The preference lives as a small JSON file under the user config
//! directory, read once at startup and written on every toggle. Anything
//! that goes wrong while loading falls back to the default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Display theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme (default)
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl Theme {
    /// Returns the other theme
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Returns the lowercase display name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Persisted theme preference store
#[derive(Debug, Clone)]
pub struct ThemePreference {
    path: PathBuf,
}

impl ThemePreference {
    /// Resolves the store under the user config directory
    /// (`<config>/deskcalc/theme.json`), or `None` when no config directory
    /// exists on this system.
    #[must_use]
    pub fn from_config_dir() -> Option<Self> {
        let dir = dirs::config_dir()?;
        Some(Self::at(dir.join("deskcalc").join("theme.json")))
    }

    /// Creates a store at an explicit path
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the preference, defaulting to [`Theme::Light`] when the file
    /// is missing or unreadable.
    #[must_use]
    pub fn load(&self) -> Theme {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                tracing::debug!(path = %self.path.display(), %err, "malformed theme preference");
                Theme::default()
            }),
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    tracing::debug!(path = %self.path.display(), %err, "unreadable theme preference");
                }
                Theme::default()
            }
        }
    }

    /// Writes the preference, creating parent directories as needed
    pub fn save(&self, theme: Theme) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&theme).map_err(io::Error::other)?;
        fs::write(&self.path, json)
    }
}
