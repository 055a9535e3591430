//! Authentication API handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};

use super::dto::{LoginRequest, LoginResponse};
use crate::application::AuthService;
use crate::domain::DomainError;
use crate::interfaces::http::common::ErrorBody;

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub auth: Arc<AuthService>,
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = LoginResponse),
        (status = 400, description = "Missing identifier or password", body = ErrorBody),
        (status = 403, description = "Invalid credentials", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, DomainError> {
    let Json(request) = payload.map_err(|_| DomainError::validation("Invalid input"))?;

    // Username wins when both identifiers are sent.
    let identifier = request
        .username
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .or_else(|| request.email.as_deref().filter(|e| !e.trim().is_empty()))
        .ok_or_else(|| {
            DomainError::field_validation("Username or Email are required", "email")
        })?;

    let password = request
        .password
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| DomainError::field_validation("Password required", "password"))?;

    let outcome = state.auth.login(identifier, password).await?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        expiration: outcome.expires_at,
        id: outcome.user.id.to_string(),
        user: outcome.user.username,
    }))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    use crate::infrastructure::crypto::jwt::JwtConfig;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::UserRepository;

    async fn test_auth() -> Arc<AuthService> {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let users = Arc::new(UserRepository::new(db));
        let auth = Arc::new(AuthService::new(
            users,
            JwtConfig {
                secret: "login-handler-test-secret".to_string(),
                expiration_hours: 24,
                issuer: "devjourney-tests".to_string(),
            },
        ));
        auth.bootstrap_root_user("admin", "admin@localhost", "s3cret")
            .await
            .unwrap();
        auth
    }

    fn app(auth: Arc<AuthService>) -> Router {
        let state = AuthHandlerState { auth };
        Router::new()
            .route("/login", post(login))
            .with_state(state)
    }

    async fn send(app: Router, body: &str) -> axum::http::Response<Body> {
        use tower::Service;
        let req = Request::builder()
            .method("POST")
            .uri("/login")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let mut svc = app.into_service();
        svc.call(req).await.unwrap()
    }

    async fn body_json(resp: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn login_with_username_returns_token_id_and_username() {
        let resp = send(
            app(test_auth().await),
            r#"{"username": "admin", "password": "s3cret"}"#,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert!(json["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert!(json["expiration"].as_i64().is_some());
        assert!(json["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert_eq!(json["user"], "admin");
    }

    #[tokio::test]
    async fn login_with_email_works_too() {
        let resp = send(
            app(test_auth().await),
            r#"{"email": "admin@localhost", "password": "s3cret"}"#,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_identifiers_get_a_field_tagged_400() {
        let resp = send(app(test_auth().await), r#"{"password": "s3cret"}"#).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "Username or Email are required");
        assert_eq!(json["fieldError"], "email");
    }

    #[tokio::test]
    async fn missing_password_gets_a_field_tagged_400() {
        let resp = send(app(test_auth().await), r#"{"username": "admin"}"#).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "Password required");
        assert_eq!(json["fieldError"], "password");
    }

    #[tokio::test]
    async fn malformed_json_is_invalid_input() {
        let resp = send(app(test_auth().await), "not json at all").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "Invalid input");
    }

    #[tokio::test]
    async fn wrong_password_is_forbidden() {
        let resp = send(
            app(test_auth().await),
            r#"{"username": "admin", "password": "wrong"}"#,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let json = body_json(resp).await;
        assert_eq!(json["message"], "Invalid credentials");
        assert_eq!(json["fieldError"], "unauthorized");
    }
}
