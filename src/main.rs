//!
//! HTTP server for a personal developer site: JWT login, CV hosting
//! and visitor analytics. Reads configuration from environment variables.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use devjourney::application::AuthService;
use devjourney::infrastructure::database::migrator::Migrator;
use devjourney::infrastructure::database::repositories::UserRepository;
use devjourney::{create_api_router, ensure_indexes, init_database, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting DevJourney Backend...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("📊 Prometheus metrics recorder installed");

    // ── Configuration ──────────────────────────────────────────
    let config = AppConfig::from_env();
    info!("Database: {}", config.database.url);
    info!(
        "JWT configured with {}h token expiration",
        config.jwt.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    if let Err(e) = ensure_indexes(&db).await {
        warn!("Failed to create auxiliary indexes: {}", e);
    }

    if let Err(e) = ensure_root_user(&db, &config).await {
        error!("Failed to bootstrap root user: {}", e);
        return Err(e.into());
    }

    // ── HTTP server ────────────────────────────────────────────
    let router = create_api_router(db.clone(), &config, prometheus_handle);

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    let shutdown = devjourney::support::ShutdownSignal::new();
    tokio::spawn(devjourney::support::listen_for_shutdown_signals(
        shutdown.clone(),
    ));

    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");

    let serve_shutdown = shutdown.clone();
    let result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            serve_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        })
        .await;

    if let Err(e) = result {
        error!("REST API server error: {}", e);
    }

    // ── Final cleanup ──────────────────────────────────────────
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("✅ Database connection closed");
    }

    info!("👋 DevJourney Backend shutdown complete");
    Ok(())
}

/// Create the configured root user if it does not exist yet
async fn ensure_root_user(
    db: &DatabaseConnection,
    config: &AppConfig,
) -> Result<(), devjourney::domain::DomainError> {
    let users = Arc::new(UserRepository::new(db.clone()));
    let auth = AuthService::new(users, config.jwt.clone());
    auth.bootstrap_root_user(
        &config.root.username,
        &config.root.email,
        &config.root.password,
    )
    .await
}
