//! Error types for the workspace collaborators.

use prefkit_registry::StoreError;
use thiserror::Error;

/// Errors that can occur in the workspace collaborators.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// The host directory API rejected a lookup.
    #[error("Directory API error: {0}")]
    DirectoryApi(String),

    /// The snapshot store rejected a load or save.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for workspace operations.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WorkspaceError::DirectoryApi("connection refused".to_string());
        assert_eq!(err.to_string(), "Directory API error: connection refused");
    }

    #[test]
    fn test_store_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: WorkspaceError = StoreError::Io(io_err).into();
        assert!(matches!(err, WorkspaceError::Store(_)));
    }
}
