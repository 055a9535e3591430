//! API Router with Swagger UI

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AnalyticsService, AuthService};
use crate::config::AppConfig;
use crate::domain::EventStore;
use crate::infrastructure::database::repositories::{EventRepository, UserRepository};
use crate::interfaces::http::common::ErrorBody;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{analytics, auth, cv, health, metrics, tracking};

/// Deadline applied to every request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Upload body cap: the 5 MB file plus multipart framing.
const UPLOAD_BODY_LIMIT: usize = 6 * 1024 * 1024;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        // Tracking
        tracking::track_event,
        // CV
        cv::upload_cv,
        cv::download_cv,
        // Analytics
        analytics::daily_users,
        analytics::page_time,
        analytics::downloads,
        analytics::interactions,
        analytics::devices,
        analytics::browsers,
    ),
    components(
        schemas(
            // Common
            ErrorBody,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Tracking
            tracking::TrackEventRequest,
            // CV
            cv::UploadCvResponse,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
            // Analytics
            analytics::DailyUsersEntry,
            analytics::PageTimeEntry,
            analytics::DownloadsEntry,
            analytics::InteractionEntry,
            analytics::DeviceEntry,
            analytics::BrowserEntry,
            analytics::DailyUsersResponse,
            analytics::PageTimeResponse,
            analytics::DownloadsResponse,
            analytics::InteractionsResponse,
            analytics::DevicesResponse,
            analytics::BrowsersResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "User authentication: login (JWT)"),
        (name = "Tracking", description = "Visitor event ingestion"),
        (name = "CV", description = "CV PDF upload and download"),
        (name = "Analytics", description = "Time-windowed visitor rollups"),
    ),
    info(
        title = "DevJourney Backend API",
        version = "1.0.0",
        description = "Personal site backend: authentication, CV hosting, visitor analytics",
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    db: DatabaseConnection,
    config: &AppConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    // ── Repositories and services ──────────────────────────────
    let users = Arc::new(UserRepository::new(db.clone()));
    let events: Arc<dyn EventStore> = Arc::new(EventRepository::new(db.clone()));

    let auth_service = Arc::new(AuthService::new(users, config.jwt.clone()));
    let analytics_service = Arc::new(AnalyticsService::new(events.clone()));

    let middleware_state = AuthState {
        auth: auth_service.clone(),
    };

    // ── Per-module handler states ──────────────────────────────
    let auth_state = auth::AuthHandlerState { auth: auth_service };
    let tracking_state = tracking::TrackingHandlerState { events };
    let analytics_state = analytics::AnalyticsState {
        analytics: analytics_service,
    };
    let cv_state = cv::CvState {
        dir: config.cv.dir.clone(),
        filename: config.cv.filename.clone(),
    };
    let health_state = health::HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };
    let metrics_state = metrics::MetricsState {
        handle: prometheus_handle,
    };

    // Analytics routes (protected)
    let analytics_routes = Router::new()
        .route("/daily-users", get(analytics::daily_users))
        .route("/page-time", get(analytics::page_time))
        .route("/downloads", get(analytics::downloads))
        .route("/interactions", get(analytics::interactions))
        .route("/devices", get(analytics::devices))
        .route("/browsers", get(analytics::browsers))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(analytics_state);

    // CV routes: download public, upload protected
    let cv_routes = Router::new()
        .route("/download", get(cv::download_cv))
        .route(
            "/upload",
            post(cv::upload_cv)
                .layer::<_, std::convert::Infallible>(middleware::from_fn_with_state(
                    middleware_state,
                    auth_middleware,
                ))
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .with_state(cv_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health + metrics
        .route("/health", get(health::health_check).with_state(health_state))
        .route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(metrics_state),
        )
        // Auth
        .route("/login", post(auth::login).with_state(auth_state))
        // Tracking
        .route("/info", post(tracking::track_event).with_state(tracking_state))
        // Analytics
        .nest("/analytics", analytics_routes)
        // CV
        .nest("/cv", cv_routes)
        // Middleware
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(cors_layer(&config.allow_origin))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
}

/// CORS for the configured frontend origin, with credentials. Falls
/// back to a credential-less allow-all when the origin does not parse
/// as a header value.
fn cors_layer(allow_origin: &str) -> CorsLayer {
    match allow_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true),
        Err(_) => {
            warn!("Invalid ALLOW_ORIGIN '{}', allowing any origin", allow_origin);
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
