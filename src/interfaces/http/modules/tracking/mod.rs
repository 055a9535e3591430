//! Visitor tracking module - event ingestion

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
