//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Login request. The client identifies itself by username or email;
/// at least one of the two must be non-empty.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful login payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    /// Token expiry as Unix seconds.
    pub expiration: i64,
    /// Account id.
    pub id: String,
    /// Account username.
    pub user: String,
}
