//! Shared HTTP error envelope
//!
//! Every failing endpoint answers with the same JSON shape:
//! `{"message": "...", "fieldError": "..."}` where `fieldError` only
//! appears when the failure points at a specific input field.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// JSON body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable description of what went wrong.
    pub message: String,
    /// Name of the offending input field, when there is one.
    #[serde(rename = "fieldError", skip_serializing_if = "Option::is_none")]
    pub field_error: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_error: None,
        }
    }

    pub fn with_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_error: Some(field.into()),
        }
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            DomainError::Validation { message, field } => (
                StatusCode::BAD_REQUEST,
                match field {
                    Some(field) => ErrorBody::with_field(message, field),
                    None => ErrorBody::new(message),
                },
            ),
            DomainError::Conflict { message, field } => {
                (StatusCode::CONFLICT, ErrorBody::with_field(message, field))
            }
            DomainError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, ErrorBody::new(message))
            }
            DomainError::InvalidCredentials => (
                StatusCode::FORBIDDEN,
                ErrorBody::with_field("Invalid credentials", "unauthorized"),
            ),
            DomainError::NotFound(subject) => (
                StatusCode::NOT_FOUND,
                ErrorBody::new(format!("{} not found", subject)),
            ),
            DomainError::Storage(err) => {
                error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Internal server error"),
                )
            }
            DomainError::Internal(message) => {
                error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

// ── Tests ──────────────────────────────────────────────────────
