//! # Error Types
//!
//! Validation error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  └── ValidationError  - Payload validation failures (caller side)      │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Input validation errors.
///
/// Returned by [`crate::validation`] before a payload reaches the
/// repository. The repository itself never produces these.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value is not a finite number.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}
