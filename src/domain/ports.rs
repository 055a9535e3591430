//! Storage interfaces implemented by the infrastructure layer

use async_trait::async_trait;

use super::error::DomainResult;
use super::event::VisitorEvent;
use super::query::RollupQuery;
use super::user::{NewUser, User};

/// User persistence interface.
///
/// `find_*` methods return `Option` for existence checks; the
/// `require_*`/lookup methods turn absence into `NotFound` for callers
/// that treat a missing user as an error.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;

    async fn require_by_username(&self, username: &str) -> DomainResult<User>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Single lookup matching either the username or the email column.
    /// Login resolves its one identifier field through here.
    async fn find_by_username_or_email(&self, identifier: &str) -> DomainResult<User>;

    /// Inserts a new user and returns the assigned id. The password in
    /// `user` must already be a bcrypt hash.
    async fn create(&self, user: NewUser) -> DomainResult<String>;
}

/// Visitor event persistence interface.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Appends one event. Optional fields are stored as given; only
    /// storage failures are reported.
    async fn append(&self, event: VisitorEvent) -> DomainResult<()>;

    /// Events matching the query's window and predicates, ordered by
    /// date ascending.
    async fn events_matching(&self, query: &RollupQuery) -> DomainResult<Vec<VisitorEvent>>;
}
