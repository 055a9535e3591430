//! CV module - PDF upload and download

pub mod handlers;

pub use handlers::*;
