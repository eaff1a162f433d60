//! # App Error Type
//!
//! Unified error type for the coordinator and the terminal session.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in shopcart                               │
//! │                                                                         │
//! │  Shell command ──► CartController ──► Result<T, AppError>              │
//! │                          │                                              │
//! │         ┌────────────────┼─────────────────────┐                        │
//! │         ▼                ▼                     ▼                        │
//! │   CoreError        StoreError           CatalogTimeout                  │
//! │   (bad product)    (disk full)          (slow catalog)                  │
//! │         │                │                     │                        │
//! │         └────────────────┴──────────┬──────────┘                        │
//! │                                     ▼                                   │
//! │               CartController::report_error (logs the ErrorCode)        │
//! │                                     ▼                                   │
//! │                        Renderer::render_error(message)                  │
//! │                                                                         │
//! │  Nothing here ends the session; the shell keeps reading commands.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopcart_core::CoreError;
use shopcart_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the app layer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart engine rejected the input.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Persisting or reading the cart failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration values are inconsistent.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The config file is not valid TOML for `AppConfig`.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Reading a config or catalog file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog did not answer in time.
    #[error("Catalog did not respond within {0} ms")]
    CatalogTimeout(u64),

    /// The catalog answered with something unusable.
    #[error("Failed to load products: {0}")]
    Catalog(String),

    /// No catalog product has the requested id.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The shell could not parse a command line.
    #[error("{0}")]
    InvalidCommand(String),
}

/// Machine-readable error codes, for renderers that branch on the kind of
/// failure rather than its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    StorageError,
    ConfigError,
    CatalogError,
    InvalidCommand,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::CatalogError => "CATALOG_ERROR",
            ErrorCode::InvalidCommand => "INVALID_COMMAND",
        };
        f.write_str(code)
    }
}

impl AppError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Core(CoreError::Validation(_)) => ErrorCode::ValidationError,
            AppError::Core(_) | AppError::Store(_) => ErrorCode::StorageError,
            AppError::Config(_) | AppError::ConfigParse(_) => ErrorCode::ConfigError,
            AppError::Io(_) => ErrorCode::StorageError,
            AppError::CatalogTimeout(_) | AppError::Catalog(_) => ErrorCode::CatalogError,
            AppError::ProductNotFound(_) => ErrorCode::NotFound,
            AppError::InvalidCommand(_) => ErrorCode::InvalidCommand,
        }
    }
}

/// Result type for app operations.
pub type AppResult<T> = Result<T, AppError>;
