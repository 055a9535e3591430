//! Login, token validation and root-account bootstrap

use std::sync::Arc;

use tracing::info;

use crate::domain::user::normalize_identifier;
use crate::domain::{DomainError, DomainResult, NewUser, User, UserStore};
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// A signed token plus its expiry as epoch seconds.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

/// Everything the login response needs.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub expires_at: i64,
    pub user: User,
}

pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, jwt_config: JwtConfig) -> Self {
        Self { users, jwt_config }
    }

    /// Verifies credentials and issues a token. The error is the same
    /// whether the account does not exist or the password is wrong.
    pub async fn login(&self, identifier: &str, password: &str) -> DomainResult<LoginOutcome> {
        let identifier = normalize_identifier(identifier);
        let password = password.trim();

        let user = match self.users.find_by_username_or_email(&identifier).await {
            Ok(user) => user,
            Err(DomainError::NotFound(_)) => return Err(DomainError::InvalidCredentials),
            Err(e) => return Err(e),
        };

        if !verify_password(password, &user.password_hash).unwrap_or(false) {
            return Err(DomainError::InvalidCredentials);
        }

        let issued = self.issue_token(&user)?;
        Ok(LoginOutcome {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }

    pub fn issue_token(&self, user: &User) -> DomainResult<IssuedToken> {
        let (token, expires_at) =
            create_token(&user.id.to_string(), &user.username, &self.jwt_config)
                .map_err(|e| DomainError::Internal(format!("Could not create token: {}", e)))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verifies a token and resolves it back to a live account, so a
    /// token survives only as long as its user does.
    pub async fn validate_token(&self, token: &str) -> DomainResult<User> {
        let claims = verify_token(token, &self.jwt_config)
            .map_err(|_| DomainError::Unauthorized("Invalid authentication token".to_string()))?;

        if claims.is_expired() {
            return Err(DomainError::Unauthorized("Token has expired".to_string()));
        }

        match self.users.require_by_username(&claims.username).await {
            Ok(user) => Ok(user),
            Err(DomainError::NotFound(_)) => Err(DomainError::Unauthorized(
                "Invalid authentication token".to_string(),
            )),
            Err(e) => Err(e),
        }
    }

    /// Creates the configured root account if it does not exist yet.
    /// Safe to run on every startup.
    pub async fn bootstrap_root_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<()> {
        let username = normalize_identifier(username);
        // Login trims the candidate password, so hash the same form.
        let password = password.trim();

        match self.users.find_by_username_or_email(&username).await {
            Ok(user) => {
                info!("Root user '{}' already present", user.username);
                return Ok(());
            }
            Err(DomainError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        let password_hash = hash_password(password)
            .map_err(|e| DomainError::Internal(format!("Could not hash password: {}", e)))?;

        let id = self
            .users
            .create(NewUser::new(&username, email, password_hash))
            .await?;
        info!("Root user '{}' created with id {}", username, id);

        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::jwt;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::UserRepository;
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    fn test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "devjourney".to_string(),
        }
    }

    async fn service() -> AuthService {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(db));
        AuthService::new(users, test_jwt_config())
    }

    #[tokio::test]
    async fn bootstrap_then_login_round_trips() {
        let service = service().await;
        service
            .bootstrap_root_user("root", "root@example.com", "hunter2!")
            .await
            .unwrap();

        let outcome = service.login("root", "hunter2!").await.unwrap();
        assert_eq!(outcome.user.username, "root");
        assert!(outcome.expires_at > chrono::Utc::now().timestamp());

        let validated = service.validate_token(&outcome.token).await.unwrap();
        assert_eq!(validated.id, outcome.user.id);
    }

    #[tokio::test]
    async fn login_accepts_the_email_as_identifier() {
        let service = service().await;
        service
            .bootstrap_root_user("root", "root@example.com", "hunter2!")
            .await
            .unwrap();

        let outcome = service.login("Root@Example.COM", "hunter2!").await.unwrap();
        assert_eq!(outcome.user.username, "root");
    }

    #[tokio::test]
    async fn login_normalizes_identifier_and_trims_password() {
        let service = service().await;
        service
            .bootstrap_root_user("root", "root@example.com", "hunter2!")
            .await
            .unwrap();

        let outcome = service.login("  ROOT ", " hunter2! ").await.unwrap();
        assert_eq!(outcome.user.username, "root");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_alike() {
        let service = service().await;
        service
            .bootstrap_root_user("root", "root@example.com", "hunter2!")
            .await
            .unwrap();

        let wrong = service.login("root", "nope").await.unwrap_err();
        let unknown = service.login("ghost", "nope").await.unwrap_err();
        assert_eq!(wrong.to_string(), unknown.to_string());
        assert!(matches!(wrong, DomainError::InvalidCredentials));
        assert!(matches!(unknown, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn bootstrap_is_idempotent() {
        let service = service().await;
        service
            .bootstrap_root_user("root", "root@example.com", "hunter2!")
            .await
            .unwrap();
        service
            .bootstrap_root_user("root", "root@example.com", "hunter2!")
            .await
            .unwrap();

        // Still exactly one account; login still works.
        assert!(service.login("root", "hunter2!").await.is_ok());
    }

    #[tokio::test]
    async fn stored_password_is_a_hash() {
        let service = service().await;
        service
            .bootstrap_root_user("root", "root@example.com", "hunter2!")
            .await
            .unwrap();

        let user = service.users.require_by_username("root").await.unwrap();
        assert_ne!(user.password_hash, "hunter2!");
        assert!(verify_password("hunter2!", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn token_for_a_missing_user_is_rejected() {
        let service = service().await;

        let (token, _) = jwt::create_token("some-id", "ghost", &test_jwt_config()).unwrap();
        let err = service.validate_token(&token).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let service = service().await;

        let err = service.validate_token("not.a.token").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }
}
