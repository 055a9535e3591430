//! User accounts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account. Only the bcrypt hash of the password is ever
/// held in memory or persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an account. Construct via [`NewUser::new`] so the
/// username and email are normalized before they reach storage.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(username: &str, email: &str, password_hash: String) -> Self {
        Self {
            username: normalize_identifier(username),
            email: normalize_identifier(email),
            password_hash,
        }
    }
}

/// Canonical form of a username or email: trimmed and lowercased.
/// Login and account creation both pass identifiers through here, so
/// `Admin` and `admin ` always land on the same account.
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_lowercase()
}
