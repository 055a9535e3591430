//! Domain layer: core types and rules, free of HTTP and storage concerns

pub mod date_range;
pub mod error;
pub mod event;
pub mod ports;
pub mod query;
pub mod user;

pub use date_range::DateRange;
pub use error::{DomainError, DomainResult};
pub use event::VisitorEvent;
pub use ports::{EventStore, UserStore};
pub use query::{EventKind, EventPredicate, RollupQuery};
pub use user::{NewUser, User};
