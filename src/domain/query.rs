//! Typed event queries
//!
//! Rollups describe what they need as a [`RollupQuery`]; the event
//! repository lowers the predicates to SQL. Keeping the vocabulary
//! closed here means a new filter is a new enum variant, not a stray
//! string in a handler.

use super::date_range::DateRange;
use super::event::{KIND_INTERACTION, KIND_VIEW};

/// The two event categories the aggregations care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    View,
    Interaction,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => KIND_VIEW,
            Self::Interaction => KIND_INTERACTION,
        }
    }
}

/// A single filter on stored events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPredicate {
    /// `type` equals the given category.
    KindIs(EventKind),
    /// `info` equals the given tag exactly.
    InfoIs(&'static str),
    /// `info` is present and non-empty.
    InfoPresent,
    /// `time` is present.
    TimePresent,
    /// `browser` is present and non-empty.
    BrowserPresent,
}

/// A date window plus the filters a rollup applies inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollupQuery {
    pub range: DateRange,
    pub predicates: Vec<EventPredicate>,
}

impl RollupQuery {
    /// All events in the window, unfiltered.
    pub fn over(range: DateRange) -> Self {
        Self {
            range,
            predicates: Vec::new(),
        }
    }

    pub fn with(mut self, predicate: EventPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }
}
