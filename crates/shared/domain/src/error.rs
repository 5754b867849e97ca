//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use std::fmt::Display;

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more field rules were violated; every violation is listed
    #[error("Validation failed for one or more fields")]
    Validation(Vec<String>),

    /// A value outside the defined enumerants or role bits
    #[error("{0}")]
    InvalidValue(String),
}

impl DomainError {
    /// Create a validation error from a list of violation messages
    pub fn validation(errors: Vec<String>) -> Self {
        DomainError::Validation(errors)
    }

    /// Create an error for an undefined `kind` value
    pub fn invalid_value(kind: &str, value: impl Display) -> Self {
        DomainError::InvalidValue(format!("Unknown {} value '{}'", kind, value))
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
