use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for trash sweeping
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Could not find: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("No permission for: {}", path.display())]
    AccessDenied { path: PathBuf },

    #[error("Failed to read metadata for {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to delete {}: {source}", path.display())]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Platform not supported: {0}")]
    NotSupported(String),
}

impl SweepError {
    /// Classify an I/O failure on `path` by its kind.
    pub fn from_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => SweepError::NotFound { path },
            io::ErrorKind::PermissionDenied => SweepError::AccessDenied { path },
            _ => SweepError::Metadata { path, source: err },
        }
    }
}

/// Result type alias for sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;
