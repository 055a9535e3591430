//! Visitor analytics: typed store queries plus pure aggregation folds

pub mod rollups;
pub mod service;

pub use rollups::{
    BrowserRow, DailyUsersRow, DeviceRow, DownloadsRow, InteractionRow, PageTimeRow,
};
pub use service::AnalyticsService;
