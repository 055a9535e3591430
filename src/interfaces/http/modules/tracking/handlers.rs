//! Visitor tracking handlers
//!
//! Ingestion is fire-and-forget: the request is acknowledged as soon as
//! the payload parses, and the insert runs in a background task. A
//! tracker beacon must never block on, or learn about, storage trouble.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use super::dto::TrackEventRequest;
use crate::domain::{EventStore, VisitorEvent};
use crate::interfaces::http::common::{ErrorBody, ValidatedJson};

/// Tracking state
#[derive(Clone)]
pub struct TrackingHandlerState {
    pub events: Arc<dyn EventStore>,
}

#[utoipa::path(
    post,
    path = "/info",
    tag = "Tracking",
    request_body = TrackEventRequest,
    responses(
        (status = 202, description = "Event accepted for storage"),
        (status = 400, description = "Unparseable body or missing uuid", body = ErrorBody)
    )
)]
pub async fn track_event(
    State(state): State<TrackingHandlerState>,
    ValidatedJson(request): ValidatedJson<TrackEventRequest>,
) -> StatusCode {
    let event = VisitorEvent::from(request);
    let events = state.events.clone();

    tokio::spawn(async move {
        match events.append(event).await {
            Ok(()) => metrics::counter!("visit_events_ingested_total").increment(1),
            Err(err) => {
                metrics::counter!("visit_events_dropped_total").increment(1);
                warn!("Failed to store visitor event: {}", err);
            }
        }
    });

    StatusCode::ACCEPTED
}

// ── Tests ──────────────────────────────────────────────────────
