pub mod analytics;
pub mod auth;
pub mod cv;
pub mod health;
pub mod metrics;
pub mod tracking;
