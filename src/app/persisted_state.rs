// SPDX-License-Identifier: MPL-2.0
//! Identity persistence using CBOR format.
//!
//! The backend has no sessions: a survivor proves who they are by sending
//! their own id in a header. The only thing the client persists across
//! sessions is that id (plus the display name), stored in CBOR — compact,
//! and clearly separated from the user-editable TOML preferences.
//!
//! # Path Resolution
//!
//! The identity file location can be customized for testing or portable
//! deployments:
//! 1. Use `load_from()`/`save_to()` with an explicit path override
//! 2. Set `ICED_OUTPOST_DATA_DIR` environment variable
//! 3. Falls back to the platform-specific data directory

use super::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// Identity file name within the app data directory.
const IDENTITY_FILE: &str = "identity.cbor";

/// The local user's identity in the survivor directory.
///
/// `None` means the user has not registered (or identified) yet; the
/// application then runs in anonymous read-only mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    #[serde(default)]
    pub survivor_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn is_identified(&self) -> bool {
        self.survivor_id.is_some()
    }

    /// Loads the identity from the default location.
    ///
    /// Returns `(identity, optional_warning)`. If loading fails, returns an
    /// anonymous identity with a toast key explaining what went wrong.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads the identity from a custom directory (tests, portable builds).
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::identity_file_path_with_override(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => {
                let reader = BufReader::new(file);
                match ciborium::from_reader(reader) {
                    Ok(identity) => (identity, None),
                    Err(_) => (Self::default(), Some("identity-read-error".to_string())),
                }
            }
            Err(_) => (Self::default(), Some("identity-read-error".to_string())),
        }
    }

    /// Saves the identity to the default location.
    ///
    /// Creates the parent directory if it doesn't exist. Returns a toast
    /// key on failure.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    /// Saves the identity to a custom directory (tests, portable builds).
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::identity_file_path_with_override(base_dir) else {
            return Some("identity-write-error".to_string());
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return Some("identity-write-error".to_string());
            }
        }

        match fs::File::create(&path) {
            Ok(file) => {
                let writer = BufWriter::new(file);
                if ciborium::into_writer(self, writer).is_err() {
                    return Some("identity-write-error".to_string());
                }
                None
            }
            Err(_) => Some("identity-write-error".to_string()),
        }
    }

    fn identity_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|dir| dir.join(IDENTITY_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_identity_is_anonymous() {
        let identity = Identity::default();
        assert!(!identity.is_identified());
        assert!(identity.survivor_id.is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base = Some(temp_dir.path().to_path_buf());

        let identity = Identity {
            survivor_id: Some("abc-123".to_string()),
            name: Some("Jane Smith".to_string()),
        };

        assert!(identity.save_to(base.clone()).is_none());
        let (loaded, warning) = Identity::load_from(base);

        assert!(warning.is_none());
        assert_eq!(loaded, identity);
        assert!(loaded.is_identified());
    }

    #[test]
    fn missing_file_loads_default_without_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (identity, warning) = Identity::load_from(Some(temp_dir.path().to_path_buf()));

        assert_eq!(identity, Identity::default());
        assert!(warning.is_none());
    }

    #[test]
    fn corrupted_file_loads_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(IDENTITY_FILE), b"not cbor at all")
            .expect("failed to write corrupted file");

        let (identity, warning) = Identity::load_from(Some(temp_dir.path().to_path_buf()));

        assert_eq!(identity, Identity::default());
        assert_eq!(warning.as_deref(), Some("identity-read-error"));
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let nested = temp_dir.path().join("nested").join("state");

        let identity = Identity {
            survivor_id: Some("abc".to_string()),
            name: None,
        };

        assert!(identity.save_to(Some(nested.clone())).is_none());
        assert!(nested.join(IDENTITY_FILE).exists());
    }
}
