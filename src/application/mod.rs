//! Application layer - business logic over the domain ports

pub mod analytics;
pub mod auth;

pub use analytics::AnalyticsService;
pub use auth::AuthService;
