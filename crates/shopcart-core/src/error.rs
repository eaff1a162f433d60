//! # Error Types
//!
//! Domain-specific error types for shopcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopcart-core errors (this file)                                      │
//! │  ├── CoreError        - Snapshot + transition failures                 │
//! │  └── ValidationError  - Malformed product / line item                  │
//! │                                                                         │
//! │  shopcart-store errors (separate crate)                                │
//! │  └── StoreError       - Storage backend failures                       │
//! │                                                                         │
//! │  app errors (apps/shopcart)                                            │
//! │  └── AppError         - What the terminal session reports              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → Renderer               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note that most cart operations cannot fail at all: removing or updating an
//! id that is not in the cart is a no-op, and a corrupted snapshot hydrates to
//! an empty cart. Only `add_item` and the strict snapshot parser return errors.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart engine errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A persisted snapshot could not be parsed as a line item array.
    ///
    /// ## When This Occurs
    /// - Storage holds truncated or hand-edited JSON
    /// - A record has the wrong shape (string price, missing quantity)
    #[error("Corrupt cart snapshot: {reason}")]
    CorruptSnapshot { reason: String },

    /// Serializing the cart failed.
    #[error("Failed to serialize cart: {0}")]
    Serialization(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the boundary, before a value is allowed into a `CartState`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., two line items with the same id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a MustBePositive error for the given field.
    pub fn must_be_positive(field: impl Into<String>) -> Self {
        ValidationError::MustBePositive {
            field: field.into(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::CorruptSnapshot {
            reason: err.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
