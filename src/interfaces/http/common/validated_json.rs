//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` works like `axum::Json<T>`, but additionally runs
//! `validator::Validate::validate()` on the deserialized value. Both
//! parse and validation failures answer with the shared `ErrorBody`
//! envelope so clients see one error shape everywhere.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ErrorBody;

/// An extractor that deserializes JSON and validates it.
///
/// # Usage
///
/// ```ignore
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct TrackEvent {
///     #[validate(length(min = 1, message = "UUID is required"))]
///     uuid: String,
/// }
///
/// async fn handler(ValidatedJson(body): ValidatedJson<TrackEvent>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

/// Error type for `ValidatedJson` extraction failures.
pub enum ValidatedJsonRejection {
    /// JSON parsing failed.
    JsonError(JsonRejection),
    /// Validation failed.
    ValidationError(validator::ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(_) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody::new("Invalid input"))).into_response()
            }
            Self::ValidationError(errors) => {
                let mut entries: Vec<(String, String)> = errors
                    .field_errors()
                    .iter()
                    .filter_map(|(field, errs)| {
                        errs.first().map(|e| {
                            let message = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| format!("{} is invalid", field));
                            (field.to_string(), message)
                        })
                    })
                    .collect();
                entries.sort_by(|a, b| a.0.cmp(&b.0));

                let body = match entries.into_iter().next() {
                    Some((field, message)) => ErrorBody::with_field(message, field),
                    None => ErrorBody::new("Validation failed"),
                };

                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────
