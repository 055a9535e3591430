//! Analytics API handlers
//!
//! Thin HTTP shims over [`AnalyticsService`]: parse the window, run the
//! rollup, wrap rows in the envelope the dashboard expects.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::dto::*;
use crate::application::AnalyticsService;
use crate::domain::{DateRange, DomainError};
use crate::interfaces::http::common::ErrorBody;

/// Analytics handler state.
#[derive(Clone)]
pub struct AnalyticsState {
    pub analytics: Arc<AnalyticsService>,
}

// ── Query params ───────────────────────────────────────────────

/// Date window shared by every analytics endpoint. Both bounds must be
/// present to take effect; otherwise the window defaults to the last
/// 30 days.
#[derive(Debug, Deserialize)]
pub struct RangeParams {
    /// Window start, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Window end, `YYYY-MM-DD` (inclusive).
    pub end_date: Option<String>,
}

impl RangeParams {
    fn resolve(&self) -> Result<DateRange, DomainError> {
        DateRange::parse(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

// ── 1. Daily unique users ──────────────────────────────────────

/// Distinct visitors per calendar day.
#[utoipa::path(
    get,
    path = "/analytics/daily-users",
    tag = "Analytics",
    params(
        ("start_date" = Option<String>, Query, description = "Window start, YYYY-MM-DD"),
        ("end_date" = Option<String>, Query, description = "Window end, YYYY-MM-DD")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Daily unique visitors", body = DailyUsersResponse),
        (status = 400, description = "Malformed date", body = ErrorBody)
    )
)]
pub async fn daily_users(
    State(state): State<AnalyticsState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<DailyUsersResponse>, DomainError> {
    let range = params.resolve()?;
    let rows = state.analytics.daily_unique_users(range).await?;
    let (start_date, end_date) = window_bounds(&range);

    let data: Vec<DailyUsersEntry> = rows.into_iter().map(Into::into).collect();
    Ok(Json(DailyUsersResponse {
        total_days: data.len(),
        data,
        start_date,
        end_date,
    }))
}

// ── 2. Page dwell time ─────────────────────────────────────────

/// Mean dwell time per page per day.
#[utoipa::path(
    get,
    path = "/analytics/page-time",
    tag = "Analytics",
    params(
        ("start_date" = Option<String>, Query, description = "Window start, YYYY-MM-DD"),
        ("end_date" = Option<String>, Query, description = "Window end, YYYY-MM-DD")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Average time per page", body = PageTimeResponse),
        (status = 400, description = "Malformed date", body = ErrorBody)
    )
)]
pub async fn page_time(
    State(state): State<AnalyticsState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<PageTimeResponse>, DomainError> {
    let range = params.resolve()?;
    let rows = state.analytics.average_page_time(range).await?;
    let (start_date, end_date) = window_bounds(&range);

    let data: Vec<PageTimeEntry> = rows.into_iter().map(Into::into).collect();
    Ok(Json(PageTimeResponse {
        total_records: data.len(),
        data,
        start_date,
        end_date,
    }))
}

// ── 3. CV downloads ────────────────────────────────────────────

/// Download interactions per page per day.
#[utoipa::path(
    get,
    path = "/analytics/downloads",
    tag = "Analytics",
    params(
        ("start_date" = Option<String>, Query, description = "Window start, YYYY-MM-DD"),
        ("end_date" = Option<String>, Query, description = "Window end, YYYY-MM-DD")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Daily download counts", body = DownloadsResponse),
        (status = 400, description = "Malformed date", body = ErrorBody)
    )
)]
pub async fn downloads(
    State(state): State<AnalyticsState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<DownloadsResponse>, DomainError> {
    let range = params.resolve()?;
    let rows = state.analytics.daily_downloads(range).await?;
    let (start_date, end_date) = window_bounds(&range);

    let data: Vec<DownloadsEntry> = rows.into_iter().map(Into::into).collect();
    let total_downloads = data.iter().map(|row| row.downloads).sum();
    Ok(Json(DownloadsResponse {
        data,
        start_date,
        end_date,
        total_downloads,
    }))
}

// ── 4. Interactions ────────────────────────────────────────────

/// Interaction counts per tag, busiest first.
#[utoipa::path(
    get,
    path = "/analytics/interactions",
    tag = "Analytics",
    params(
        ("start_date" = Option<String>, Query, description = "Window start, YYYY-MM-DD"),
        ("end_date" = Option<String>, Query, description = "Window end, YYYY-MM-DD")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Interaction tag counts", body = InteractionsResponse),
        (status = 400, description = "Malformed date", body = ErrorBody)
    )
)]
pub async fn interactions(
    State(state): State<AnalyticsState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<InteractionsResponse>, DomainError> {
    let range = params.resolve()?;
    let rows = state.analytics.interaction_stats(range).await?;
    let (start_date, end_date) = window_bounds(&range);

    let data: Vec<InteractionEntry> = rows.into_iter().map(Into::into).collect();
    let total_interactions = data.iter().map(|row| row.count).sum();
    Ok(Json(InteractionsResponse {
        data,
        start_date,
        end_date,
        total_interactions,
    }))
}

// ── 5. Devices ─────────────────────────────────────────────────

/// Distinct visitors per device class, biggest share first.
#[utoipa::path(
    get,
    path = "/analytics/devices",
    tag = "Analytics",
    params(
        ("start_date" = Option<String>, Query, description = "Window start, YYYY-MM-DD"),
        ("end_date" = Option<String>, Query, description = "Window end, YYYY-MM-DD")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Device share", body = DevicesResponse),
        (status = 400, description = "Malformed date", body = ErrorBody)
    )
)]
pub async fn devices(
    State(state): State<AnalyticsState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<DevicesResponse>, DomainError> {
    let range = params.resolve()?;
    let rows = state.analytics.device_stats(range).await?;
    let (start_date, end_date) = window_bounds(&range);

    let data: Vec<DeviceEntry> = rows.into_iter().map(Into::into).collect();
    let total_users = data.iter().map(|row| row.count).sum();
    Ok(Json(DevicesResponse {
        data,
        start_date,
        end_date,
        total_users,
    }))
}

// ── 6. Browsers ────────────────────────────────────────────────

/// Distinct visitors per browser, biggest share first.
#[utoipa::path(
    get,
    path = "/analytics/browsers",
    tag = "Analytics",
    params(
        ("start_date" = Option<String>, Query, description = "Window start, YYYY-MM-DD"),
        ("end_date" = Option<String>, Query, description = "Window end, YYYY-MM-DD")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Browser share", body = BrowsersResponse),
        (status = 400, description = "Malformed date", body = ErrorBody)
    )
)]
pub async fn browsers(
    State(state): State<AnalyticsState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<BrowsersResponse>, DomainError> {
    let range = params.resolve()?;
    let rows = state.analytics.browser_stats(range).await?;
    let (start_date, end_date) = window_bounds(&range);

    let data: Vec<BrowserEntry> = rows.into_iter().map(Into::into).collect();
    let total_users = data.iter().map(|row| row.count).sum();
    Ok(Json(BrowsersResponse {
        data,
        start_date,
        end_date,
        total_users,
    }))
}

// ── Tests ──────────────────────────────────────────────────────
