//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! io::Error / CoreError
//!       │
//!       ▼
//! StoreError (this module) ← adds key / path context
//!       │
//!       ▼
//! AppError (apps/shopcart) ← rendered to the user
//! ```

use std::path::PathBuf;

use shopcart_core::CoreError;
use thiserror::Error;

/// Storage backend errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters the backend cannot store.
    ///
    /// ## When This Occurs
    /// - Empty key
    /// - Key with path separators or dots (FileStorage maps keys to file names)
    #[error("Invalid storage key '{0}': use letters, digits, '-' or '_'")]
    InvalidKey(String),

    /// No platform data directory could be determined.
    #[error("Could not determine a data directory for storage")]
    NoDataDir,

    /// Cart could not be serialized for storage.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] CoreError),
}

impl StoreError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
