//! Error types for the registry crate.
//!
//! Store errors cover the persistence boundary; settings errors cover
//! registration and lifecycle operations. Both use `thiserror`.

use std::io;
use thiserror::Error;

/// Errors from the snapshot persistence boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The storage directory could not be resolved or created.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A setting definition failed validation.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting {
        /// The key of the offending definition.
        key: String,
        /// Why the definition was rejected.
        reason: String,
    },

    /// The snapshot store rejected a load or save.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::ConfigDirectory("no home directory".to_string());
        assert_eq!(err.to_string(), "Config directory error: no home directory");
    }

    #[test]
    fn test_settings_error_display() {
        let err = SettingsError::InvalidSetting {
            key: "theme".to_string(),
            reason: "missing widget overrides".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid setting 'theme': missing widget overrides"
        );
    }

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let store_err: StoreError = io_err.into();
        assert!(matches!(store_err, StoreError::Io(_)));

        let settings_err: SettingsError = store_err.into();
        assert!(matches!(settings_err, SettingsError::Store(_)));
    }
}
