//! # AppError
//!
//! Centralized error handling for the rusty-votes ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all rv-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation failure (e.g., unrecognized target type, value out of range).
    /// The message names the offending field.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unique-key collision (e.g., a second rating for the same voter key)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Resource not found (e.g., a voter row missing during an update)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Infrastructure failure (e.g., DB down). Logged, never shown verbatim
    /// to API clients.
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for rusty-votes logic.
pub type Result<T> = std::result::Result<T, AppError>;
