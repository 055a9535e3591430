//! Analytics module - time-windowed visitor rollups

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
