//! # DevJourney Backend
//!
//! Backend for a personal developer site: JWT authentication, CV
//! hosting and visitor analytics over SQLite.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and traits
//! - **application**: Business logic (authentication, analytics rollups)
//! - **infrastructure**: External concerns (database, crypto)
//! - **interfaces**: REST API with Swagger documentation
//! - **support**: Graceful shutdown plumbing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod support;

pub use config::AppConfig;

// Re-export database types for easy access
pub use infrastructure::{ensure_indexes, init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
