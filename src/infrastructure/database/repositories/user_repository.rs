use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, NewUser, User, UserStore};
use crate::infrastructure::database::entities::user;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(model.map(user_model_to_domain))
    }

    async fn require_by_username(&self, username: &str) -> DomainResult<User> {
        self.find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::NotFound("User".to_string()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(user_model_to_domain))
    }

    async fn find_by_username_or_email(&self, identifier: &str) -> DomainResult<User> {
        let model = user::Entity::find()
            .filter(
                user::Column::Username
                    .eq(identifier)
                    .or(user::Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await?;

        model
            .map(user_model_to_domain)
            .ok_or_else(|| DomainError::NotFound("User".to_string()))
    }

    async fn create(&self, user: NewUser) -> DomainResult<String> {
        // Pre-check both unique columns so the caller gets a field tag,
        // not just a bare constraint violation.
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(DomainError::Conflict {
                message: "This email is already registered".to_string(),
                field: "email",
            });
        }
        if self.find_by_username(&user.username).await?.is_some() {
            return Err(DomainError::Conflict {
                message: "Username already exists".to_string(),
                field: "username",
            });
        }

        let id = Uuid::new_v4();
        let new_user = user::ActiveModel {
            id: Set(id),
            username: Set(user.username),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            created_at: Set(Utc::now()),
        };

        new_user.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") || e.to_string().contains("duplicate") {
                DomainError::Conflict {
                    message: "Username or email already exists".to_string(),
                    field: "username",
                }
            } else {
                DomainError::Storage(e)
            }
        })?;

        Ok(id.to_string())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    async fn repo() -> UserRepository {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        UserRepository::new(db)
    }

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser::new(username, email, "bcrypt-hash".to_string())
    }

    #[tokio::test]
    async fn create_then_find_round_trips() {
        let repo = repo().await;

        let id = repo.create(new_user("alice", "alice@example.com")).await.unwrap();

        let found = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id.to_string(), id);
        assert_eq!(found.email, "alice@example.com");
        assert_eq!(found.password_hash, "bcrypt-hash");
    }

    #[tokio::test]
    async fn create_normalizes_identifiers() {
        let repo = repo().await;

        repo.create(new_user("  Alice ", "Alice@Example.COM")).await.unwrap();

        assert!(repo.find_by_username("alice").await.unwrap().is_some());
        assert!(repo.find_by_email("alice@example.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = repo().await;
        repo.create(new_user("alice", "shared@example.com")).await.unwrap();

        let err = repo.create(new_user("bob", "shared@example.com")).await.unwrap_err();
        match err {
            DomainError::Conflict { field, .. } => assert_eq!(field, "email"),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let repo = repo().await;
        repo.create(new_user("alice", "a@example.com")).await.unwrap();

        let err = repo.create(new_user("alice", "b@example.com")).await.unwrap_err();
        match err {
            DomainError::Conflict { field, .. } => assert_eq!(field, "username"),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn require_missing_user_is_not_found() {
        let repo = repo().await;

        let err = repo.require_by_username("ghost").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn identifier_lookup_matches_either_column() {
        let repo = repo().await;
        repo.create(new_user("alice", "alice@example.com")).await.unwrap();

        let by_name = repo.find_by_username_or_email("alice").await.unwrap();
        let by_mail = repo.find_by_username_or_email("alice@example.com").await.unwrap();
        assert_eq!(by_name.id, by_mail.id);

        let err = repo.find_by_username_or_email("nobody").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }
}
