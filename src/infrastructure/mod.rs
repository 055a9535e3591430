//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;

pub use database::{ensure_indexes, init_database, DatabaseConfig};
