//! Database repositories module

pub mod event_repository;
pub mod user_repository;

pub use event_repository::EventRepository;
pub use user_repository::UserRepository;
