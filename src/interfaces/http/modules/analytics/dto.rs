//! Analytics API data transfer objects
//!
//! Row fields serialize with the camelCase names the dashboard charts
//! bind to (`uniqueUsers`, `averageTime`); envelope fields stay
//! snake_case.

use serde::Serialize;
use utoipa::ToSchema;

use crate::application::analytics::{
    BrowserRow, DailyUsersRow, DeviceRow, DownloadsRow, InteractionRow, PageTimeRow,
};
use crate::domain::DateRange;

// ── Rows ───────────────────────────────────────────────────────

/// Distinct visitors for one day.
#[derive(Debug, Serialize, ToSchema)]
pub struct DailyUsersEntry {
    pub date: String,
    #[serde(rename = "uniqueUsers")]
    pub unique_users: u64,
}

/// Mean dwell time on one page for one day.
#[derive(Debug, Serialize, ToSchema)]
pub struct PageTimeEntry {
    pub date: String,
    pub page: String,
    #[serde(rename = "averageTime")]
    pub average_time: f64,
    #[serde(rename = "uniqueUsers")]
    pub unique_users: u64,
}

/// Download count for one page on one day.
#[derive(Debug, Serialize, ToSchema)]
pub struct DownloadsEntry {
    pub date: String,
    pub page: String,
    pub downloads: u64,
}

/// Event count for one interaction tag.
#[derive(Debug, Serialize, ToSchema)]
pub struct InteractionEntry {
    pub info: String,
    pub count: u64,
}

/// Distinct visitors per device class.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeviceEntry {
    pub device: String,
    pub count: u64,
}

/// Distinct visitors per browser.
#[derive(Debug, Serialize, ToSchema)]
pub struct BrowserEntry {
    pub browser: String,
    pub count: u64,
}

impl From<DailyUsersRow> for DailyUsersEntry {
    fn from(row: DailyUsersRow) -> Self {
        Self {
            date: row.date,
            unique_users: row.unique_users,
        }
    }
}

impl From<PageTimeRow> for PageTimeEntry {
    fn from(row: PageTimeRow) -> Self {
        Self {
            date: row.date,
            page: row.page,
            average_time: row.average_time,
            unique_users: row.unique_users,
        }
    }
}

impl From<DownloadsRow> for DownloadsEntry {
    fn from(row: DownloadsRow) -> Self {
        Self {
            date: row.date,
            page: row.page,
            downloads: row.downloads,
        }
    }
}

impl From<InteractionRow> for InteractionEntry {
    fn from(row: InteractionRow) -> Self {
        Self {
            info: row.info,
            count: row.count,
        }
    }
}

impl From<DeviceRow> for DeviceEntry {
    fn from(row: DeviceRow) -> Self {
        Self {
            device: row.device,
            count: row.count,
        }
    }
}

impl From<BrowserRow> for BrowserEntry {
    fn from(row: BrowserRow) -> Self {
        Self {
            browser: row.browser,
            count: row.count,
        }
    }
}

// ── Envelopes ──────────────────────────────────────────────────

/// Daily unique visitors response.
#[derive(Debug, Serialize, ToSchema)]
pub struct DailyUsersResponse {
    pub data: Vec<DailyUsersEntry>,
    /// Resolved window start (`YYYY-MM-DD`).
    pub start_date: String,
    /// Resolved window end (`YYYY-MM-DD`, inclusive).
    pub end_date: String,
    /// Number of days with at least one visitor.
    pub total_days: usize,
}

/// Page dwell-time response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PageTimeResponse {
    pub data: Vec<PageTimeEntry>,
    pub start_date: String,
    pub end_date: String,
    pub total_records: usize,
}

/// CV download counts response.
#[derive(Debug, Serialize, ToSchema)]
pub struct DownloadsResponse {
    pub data: Vec<DownloadsEntry>,
    pub start_date: String,
    pub end_date: String,
    /// Sum of downloads over every row.
    pub total_downloads: u64,
}

/// Interaction tag counts response.
#[derive(Debug, Serialize, ToSchema)]
pub struct InteractionsResponse {
    pub data: Vec<InteractionEntry>,
    pub start_date: String,
    pub end_date: String,
    pub total_interactions: u64,
}

/// Device share response.
#[derive(Debug, Serialize, ToSchema)]
pub struct DevicesResponse {
    pub data: Vec<DeviceEntry>,
    pub start_date: String,
    pub end_date: String,
    pub total_users: u64,
}

/// Browser share response.
#[derive(Debug, Serialize, ToSchema)]
pub struct BrowsersResponse {
    pub data: Vec<BrowserEntry>,
    pub start_date: String,
    pub end_date: String,
    pub total_users: u64,
}

/// The resolved window bounds echoed by every analytics envelope.
pub fn window_bounds(range: &DateRange) -> (String, String) {
    (
        range.start.format("%Y-%m-%d").to_string(),
        range.end.format("%Y-%m-%d").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_serialize_with_camel_case_names() {
        let entry = PageTimeEntry {
            date: "2025-01-05".to_string(),
            page: "/projects".to_string(),
            average_time: 12.34,
            unique_users: 3,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"averageTime\":12.34"));
        assert!(json.contains("\"uniqueUsers\":3"));
    }

    #[test]
    fn envelope_fields_stay_snake_case() {
        let resp = DownloadsResponse {
            data: vec![],
            start_date: "2025-01-01".to_string(),
            end_date: "2025-01-31".to_string(),
            total_downloads: 0,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"start_date\":\"2025-01-01\""));
        assert!(json.contains("\"total_downloads\":0"));
    }
}
