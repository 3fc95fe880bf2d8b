//! Selected countdown duration, behind an injectable store

use std::{
    fs,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::engine::DEFAULT_DURATION_SECS;

/// Errors while persisting preferences
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to write preferences file {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode preferences")]
    Encode(#[from] serde_json::Error),
}

/// Provider of the user's selected countdown duration
pub trait PreferenceStore: Send {
    /// Selected duration in seconds, never zero or negative
    fn selected_duration(&self) -> f64;

    fn set_selected_duration(&mut self, seconds: f64) -> Result<(), PreferenceError>;
}

/// Apply the default to an unset, non-finite or non-positive stored value
pub fn effective_duration(stored: Option<f64>) -> f64 {
    match stored {
        Some(seconds) if seconds.is_finite() && seconds > 0.0 => seconds,
        _ => DEFAULT_DURATION_SECS,
    }
}

/// Preferences kept only for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    selected_time: Option<f64>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selected(seconds: f64) -> Self {
        Self {
            selected_time: Some(seconds),
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn selected_duration(&self) -> f64 {
        effective_duration(self.selected_time)
    }

    fn set_selected_duration(&mut self, seconds: f64) -> Result<(), PreferenceError> {
        self.selected_time = Some(seconds);
        Ok(())
    }
}

/// On-disk layout of the preferences file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PreferencesFile {
    #[serde(default)]
    selected_time: Option<f64>,
}

/// Preferences stored as a small JSON document
#[derive(Debug, Clone)]
pub struct JsonFilePreferences {
    path: PathBuf,
    contents: PreferencesFile,
}

impl JsonFilePreferences {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let contents = Self::load(&path);
        Self { path, contents }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> PreferencesFile {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No preferences file at {}, using defaults", path.display());
                return PreferencesFile::default();
            }
            Err(e) => {
                warn!("Failed to read preferences file {}: {}", path.display(), e);
                return PreferencesFile::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Ignoring malformed preferences file {}: {}", path.display(), e);
                PreferencesFile::default()
            }
        }
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn selected_duration(&self) -> f64 {
        effective_duration(self.contents.selected_time)
    }

    fn set_selected_duration(&mut self, seconds: f64) -> Result<(), PreferenceError> {
        let updated = PreferencesFile {
            selected_time: Some(seconds),
        };
        let encoded = serde_json::to_string_pretty(&updated)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PreferenceError::WriteFile {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, encoded).map_err(|source| PreferenceError::WriteFile {
            path: self.path.clone(),
            source,
        })?;

        self.contents = updated;
        info!("Saved selected duration {}s to {}", seconds, self.path.display());
        Ok(())
    }
}
