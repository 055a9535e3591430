//! Configuration module
//!
//! Every setting comes from the environment, with defaults that work
//! for local development.

use std::path::PathBuf;

use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::DatabaseConfig;

/// Root account created at startup when missing.
#[derive(Debug, Clone)]
pub struct RootUserConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// CV storage location.
#[derive(Debug, Clone)]
pub struct CvConfig {
    /// Directory the uploaded PDF lands in.
    pub dir: PathBuf,
    /// On-disk (and download) filename.
    pub filename: String,
}

/// Full application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Bind port (`PORT`).
    pub port: u16,
    /// Origin allowed by CORS (`ALLOW_ORIGIN`).
    pub allow_origin: String,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub root: RootUserConfig,
    pub cv: CvConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Socket address string for the HTTP listener.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            allow_origin: env_or("ALLOW_ORIGIN", "http://localhost:3000"),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            root: RootUserConfig {
                username: env_or("ROOT_USERNAME", "admin"),
                email: env_or("ROOT_EMAIL", "root@localhost"),
                password: env_or("ROOT_PASSWORD", "change-me"),
            },
            cv: CvConfig {
                dir: PathBuf::from(env_or("CV_DIR", "./uploads")),
                filename: env_or("CV_FILENAME", "cv.pdf"),
            },
        }
    }
}

fn env_or(key: &str, fallback: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| fallback.to_string())
}
