//! HS256 token issuing and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Signing parameters shared by token creation and verification.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    /// Value of the `iss` claim; verification rejects other issuers.
    pub issuer: String,
}

impl JwtConfig {
    /// Read `JWT_SECRET`, `JWT_EXPIRATION_HOURS` and `APP_NAME`, with
    /// development fallbacks for all three.
    pub fn from_env() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secret-key-change-in-production".to_string()),
            expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24),
            issuer: std::env::var("APP_NAME").unwrap_or_else(|_| "devjourney".to_string()),
        }
    }
}

/// Claims carried by every token this service signs.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// User id.
    pub sub: String,
    pub username: String,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    /// Issued at, seconds since the epoch.
    pub iat: i64,
    pub iss: String,
}

impl TokenClaims {
    fn for_user(user_id: &str, username: &str, config: &JwtConfig) -> Self {
        let issued_at = Utc::now();
        let expires_at = issued_at + Duration::hours(config.expiration_hours);

        Self {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
            iss: config.issuer.clone(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Sign a token for a user. Returns the token together with its expiry
/// as a Unix timestamp, which the login response echoes.
pub fn create_token(
    user_id: &str,
    username: &str,
    config: &JwtConfig,
) -> Result<(String, i64), jsonwebtoken::errors::Error> {
    let claims = TokenClaims::for_user(user_id, username, config);
    let key = EncodingKey::from_secret(config.secret.as_bytes());

    let token = encode(&Header::default(), &claims, &key)?;
    Ok((token, claims.exp))
}

/// Verify signature, expiry and issuer, returning the claims.
///
/// `Validation::default()` accepts HS256 only, so tokens signed with
/// any other algorithm (or none) fail before the claims are looked at.
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[config.issuer.as_str()]);

    let key = DecodingKey::from_secret(config.secret.as_bytes());
    decode::<TokenClaims>(token, &key, &validation).map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 24,
            issuer: "devjourney".to_string(),
        }
    }

    #[test]
    fn token_round_trips() {
        let cfg = config();
        let (token, exp) = create_token("user-1", "alice", &cfg).unwrap();

        let claims = verify_token(&token, &cfg).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.iss, "devjourney");
        assert_eq!(claims.exp, exp);
        assert!(!claims.is_expired());
    }

    #[test]
    fn expiry_is_expiration_hours_out() {
        let cfg = config();
        let before = Utc::now().timestamp();
        let (_, exp) = create_token("user-1", "alice", &cfg).unwrap();
        let after = Utc::now().timestamp();

        assert!(exp >= before + 24 * 3600);
        assert!(exp <= after + 24 * 3600);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let cfg = config();
        let (token, _) = create_token("user-1", "alice", &cfg).unwrap();

        let other = JwtConfig {
            secret: "different-secret".to_string(),
            ..config()
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let cfg = config();
        let (token, _) = create_token("user-1", "alice", &cfg).unwrap();

        let other = JwtConfig {
            issuer: "someone-else".to_string(),
            ..config()
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let cfg = JwtConfig {
            expiration_hours: -1,
            ..config()
        };
        let (token, _) = create_token("user-1", "alice", &cfg).unwrap();

        assert!(verify_token(&token, &cfg).is_err());
    }

    #[test]
    fn mangled_token_is_rejected() {
        let cfg = config();
        let (token, _) = create_token("user-1", "alice", &cfg).unwrap();

        let mut mangled = token.clone();
        mangled.push('x');
        assert!(verify_token(&mangled, &cfg).is_err());
        assert!(verify_token("not.a.token", &cfg).is_err());
    }
}
