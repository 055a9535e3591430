//! Authentication middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::application::AuthService;
use crate::domain::User;
use crate::interfaces::http::common::ErrorBody;

/// Authentication error types raised before the token reaches the
/// auth service.
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidTokenFormat,
}

/// Authentication state shared by every protected route group.
#[derive(Clone)]
pub struct AuthState {
    pub auth: Arc<AuthService>,
}

/// Authenticated user information attached to the request extensions.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
}

impl AuthenticatedUser {
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
        }
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    if auth_header.starts_with("Bearer ") {
        Some(&auth_header[7..])
    } else {
        None
    }
}

/// JWT authentication middleware
///
/// Verifies the bearer token, checks that the account behind it still
/// exists, and stores the resolved [`AuthenticatedUser`] in the request
/// extensions for downstream handlers.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidTokenFormat);
    };

    match auth_state.auth.validate_token(token).await {
        Ok(user) => {
            request
                .extensions_mut()
                .insert(AuthenticatedUser::from_user(&user));
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

fn auth_error_response(error: AuthError) -> Response {
    let message = match error {
        AuthError::MissingToken => "Missing authentication token",
        AuthError::InvalidTokenFormat => "Invalid token format",
    };

    (StatusCode::UNAUTHORIZED, Json(ErrorBody::new(message))).into_response()
}

// ── Tests ──────────────────────────────────────────────────────
