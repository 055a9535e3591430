//! HTTP REST API interfaces
//!
//! - `common`: Shared response bodies and validated extractors
//! - `middleware`: JWT authentication middleware
//! - `modules`: Request handlers grouped by resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::create_api_router;
