//! Analytics service: pairs each rollup with its store query

use std::sync::Arc;

use crate::domain::{DateRange, DomainResult, EventKind, EventPredicate, EventStore, RollupQuery};

use super::rollups::{
    self, BrowserRow, DailyUsersRow, DeviceRow, DownloadsRow, InteractionRow, PageTimeRow,
};

/// The `info` tag marking a CV download interaction.
const DOWNLOAD_TAG: &str = "download";

pub struct AnalyticsService {
    events: Arc<dyn EventStore>,
}

impl AnalyticsService {
    pub fn new(events: Arc<dyn EventStore>) -> Self {
        Self { events }
    }

    pub async fn daily_unique_users(&self, range: DateRange) -> DomainResult<Vec<DailyUsersRow>> {
        let events = self.events.events_matching(&RollupQuery::over(range)).await?;
        Ok(rollups::daily_unique_users(&events))
    }

    pub async fn average_page_time(&self, range: DateRange) -> DomainResult<Vec<PageTimeRow>> {
        let query = RollupQuery::over(range)
            .with(EventPredicate::KindIs(EventKind::View))
            .with(EventPredicate::TimePresent);
        let events = self.events.events_matching(&query).await?;
        Ok(rollups::average_page_time(&events))
    }

    pub async fn daily_downloads(&self, range: DateRange) -> DomainResult<Vec<DownloadsRow>> {
        let query = RollupQuery::over(range)
            .with(EventPredicate::KindIs(EventKind::Interaction))
            .with(EventPredicate::InfoIs(DOWNLOAD_TAG));
        let events = self.events.events_matching(&query).await?;
        Ok(rollups::daily_downloads(&events))
    }

    pub async fn interaction_stats(&self, range: DateRange) -> DomainResult<Vec<InteractionRow>> {
        let query = RollupQuery::over(range)
            .with(EventPredicate::KindIs(EventKind::Interaction))
            .with(EventPredicate::InfoPresent);
        let events = self.events.events_matching(&query).await?;
        Ok(rollups::interaction_stats(&events))
    }

    pub async fn device_stats(&self, range: DateRange) -> DomainResult<Vec<DeviceRow>> {
        let events = self.events.events_matching(&RollupQuery::over(range)).await?;
        Ok(rollups::device_stats(&events))
    }

    pub async fn browser_stats(&self, range: DateRange) -> DomainResult<Vec<BrowserRow>> {
        let query = RollupQuery::over(range).with(EventPredicate::BrowserPresent);
        let events = self.events.events_matching(&query).await?;
        Ok(rollups::browser_stats(&events))
    }
}

// ── Tests ──────────────────────────────────────────────────────
