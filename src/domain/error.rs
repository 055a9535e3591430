//! Domain errors

use thiserror::Error;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error types
#[derive(Debug, Error)]
pub enum DomainError {
    /// Bad input shape, bad date format, missing required field.
    #[error("{message}")]
    Validation {
        message: String,
        field: Option<&'static str>,
    },

    /// Duplicate username or email.
    #[error("{message}")]
    Conflict {
        message: String,
        field: &'static str,
    },

    /// Missing, malformed, invalid or expired token.
    #[error("{0}")]
    Unauthorized(String),

    /// Login failure. Deliberately opaque: the caller never learns
    /// whether the account exists or the password was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Storage(#[from] sea_orm::DbErr),

    #[error("{0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    pub fn field_validation(message: impl Into<String>, field: &'static str) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field),
        }
    }
}
