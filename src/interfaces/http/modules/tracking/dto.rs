//! Visitor tracking DTOs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::VisitorEvent;

/// Raw event payload sent by the frontend tracker.
///
/// Only `uuid` is enforced; every other field defaults to empty so the
/// payload binds even when an old tracker build omits something.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TrackEventRequest {
    /// ISO-8601 date-time of the event.
    #[serde(default)]
    pub date: String,
    /// Client-generated visitor identifier.
    #[serde(default)]
    #[validate(length(min = 1, message = "UUID is required"))]
    pub uuid: String,
    /// "view" or "interaction"; unknown values are stored verbatim.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub info: Option<String>,
    pub time: Option<i64>,
    #[serde(default)]
    pub page: String,
    pub device: Option<String>,
    #[serde(rename = "screenResolution")]
    pub screen_resolution: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
}

impl From<TrackEventRequest> for VisitorEvent {
    fn from(request: TrackEventRequest) -> Self {
        Self {
            date: request.date,
            uuid: request.uuid,
            kind: request.kind,
            info: request.info,
            time: request.time,
            page: request.page,
            device: request.device,
            browser: request.browser,
            os: request.os,
            screen_resolution: request.screen_resolution,
        }
    }
}
