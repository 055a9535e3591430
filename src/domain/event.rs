//! Visitor events

use serde::{Deserialize, Serialize};

/// Event category marking a page view.
pub const KIND_VIEW: &str = "view";
/// Event category marking a user interaction (click, download, ...).
pub const KIND_INTERACTION: &str = "interaction";

/// One visitor event reported by the frontend tracker.
///
/// `uuid`, `date` and `page` are always present; every other field is
/// optional and the rollups tolerate its absence. `kind` is an open
/// string on purpose: values other than [`KIND_VIEW`] and
/// [`KIND_INTERACTION`] are stored verbatim and simply never match a
/// category filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorEvent {
    /// ISO-8601 date-time string, stored exactly as reported.
    pub date: String,
    /// Client-generated visitor identifier, not verified.
    pub uuid: String,
    pub kind: Option<String>,
    /// Semantic tag (e.g. "download"), meaningful for interactions.
    pub info: Option<String>,
    /// Dwell time in seconds, meaningful for views.
    pub time: Option<i64>,
    pub page: String,
    pub device: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
    pub screen_resolution: Option<String>,
}

impl VisitorEvent {
    /// Calendar day of the event: the `YYYY-MM-DD` prefix of the date
    /// string. A textual operation, never a timezone-aware parse;
    /// strings shorter than ten characters bucket as themselves.
    pub fn day(&self) -> &str {
        self.date.get(..10).unwrap_or(&self.date)
    }
}
