//! Database entities module

pub mod user;
pub mod visit_event;

pub use user::Entity as User;
pub use visit_event::Entity as VisitEvent;
