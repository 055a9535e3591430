//! SQLite access layer: connection setup, schema migrations, secondary
//! indexes and the repositories behind the domain ports.

pub mod entities;
pub mod indexes;
pub mod migrator;
pub mod repositories;

pub use indexes::ensure_indexes;
pub use repositories::{EventRepository, UserRepository};

use sea_orm::{Database, DatabaseConnection};
use tracing::info;

const DEFAULT_URL: &str = "sqlite://./devjourney.db?mode=rwc";

/// Where the service stores its data. `mode=rwc` lets SQLite create the
/// file on first run.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

impl DatabaseConfig {
    /// Read `DATABASE_URL`, falling back to a SQLite file in the working
    /// directory.
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        Self { url }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
        }
    }
}

/// Open the connection pool described by `config`.
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let db = Database::connect(&config.url).await?;
    info!("Database connection established");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url_targets_a_creatable_sqlite_file() {
        let config = DatabaseConfig::default();
        assert!(config.url.starts_with("sqlite://"));
        assert!(config.url.contains("mode=rwc"));
    }
}
