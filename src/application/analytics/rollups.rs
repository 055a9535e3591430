//! Aggregation folds
//!
//! Pure grouping stages over fetched events. Filtering happens in the
//! store via `RollupQuery` predicates; these folds only bucket and
//! count, so they are testable without a database. The recurring
//! two-stage shape (dedupe by uuid, then count) is what keeps "unique
//! user" metrics correct when one visitor reports many events.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::VisitorEvent;

/// Distinct visitors for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyUsersRow {
    pub date: String,
    pub unique_users: u64,
}

/// Mean dwell time on one page for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct PageTimeRow {
    pub date: String,
    pub page: String,
    pub average_time: f64,
    pub unique_users: u64,
}

/// Download count for one page on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadsRow {
    pub date: String,
    pub page: String,
    pub downloads: u64,
}

/// Event count for one interaction tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRow {
    pub info: String,
    pub count: u64,
}

/// Distinct visitors per device class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRow {
    pub device: String,
    pub count: u64,
}

/// Distinct visitors per browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserRow {
    pub browser: String,
    pub count: u64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Distinct uuids per day, ascending by day.
pub fn daily_unique_users(events: &[VisitorEvent]) -> Vec<DailyUsersRow> {
    let mut users_per_day: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for event in events {
        users_per_day
            .entry(event.day())
            .or_default()
            .insert(event.uuid.as_str());
    }

    users_per_day
        .into_iter()
        .map(|(date, users)| DailyUsersRow {
            date: date.to_string(),
            unique_users: users.len() as u64,
        })
        .collect()
}

/// Mean dwell time per `(day, page)`, ascending by `(day, page)`.
///
/// Stage 1 takes the max `time` per `(day, page, uuid)`, collapsing the
/// repeated samples one visit emits into a single figure. Stage 2 means
/// those maxima and counts the contributing visitors.
pub fn average_page_time(events: &[VisitorEvent]) -> Vec<PageTimeRow> {
    let mut max_per_visit: BTreeMap<(&str, &str, &str), i64> = BTreeMap::new();
    for event in events {
        let Some(time) = event.time else { continue };
        let entry = max_per_visit
            .entry((event.day(), event.page.as_str(), event.uuid.as_str()))
            .or_insert(time);
        if time > *entry {
            *entry = time;
        }
    }

    let mut buckets: BTreeMap<(&str, &str), (i64, u64)> = BTreeMap::new();
    for ((day, page, _uuid), max_time) in max_per_visit {
        let entry = buckets.entry((day, page)).or_insert((0, 0));
        entry.0 += max_time;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|((date, page), (total, users))| PageTimeRow {
            date: date.to_string(),
            page: page.to_string(),
            average_time: round2(total as f64 / users as f64),
            unique_users: users,
        })
        .collect()
}

/// Event count per `(day, page)`, ascending by `(day, page)`.
pub fn daily_downloads(events: &[VisitorEvent]) -> Vec<DownloadsRow> {
    let mut downloads: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    for event in events {
        *downloads
            .entry((event.day(), event.page.as_str()))
            .or_insert(0) += 1;
    }

    downloads
        .into_iter()
        .map(|((date, page), count)| DownloadsRow {
            date: date.to_string(),
            page: page.to_string(),
            downloads: count,
        })
        .collect()
}

/// Event count per `info` tag, descending by count (ties: tag
/// ascending). Untagged events are skipped.
pub fn interaction_stats(events: &[VisitorEvent]) -> Vec<InteractionRow> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for event in events {
        let Some(info) = event.info.as_deref() else { continue };
        if info.is_empty() {
            continue;
        }
        *counts.entry(info).or_insert(0) += 1;
    }

    let mut rows: Vec<InteractionRow> = counts
        .into_iter()
        .map(|(info, count)| InteractionRow {
            info: info.to_string(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.info.cmp(&b.info)));
    rows
}

/// Distinct uuids per device over the whole window, descending by
/// count. Events without a device land in the empty-string bucket.
pub fn device_stats(events: &[VisitorEvent]) -> Vec<DeviceRow> {
    let mut users_per_device: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for event in events {
        users_per_device
            .entry(event.device.as_deref().unwrap_or(""))
            .or_default()
            .insert(event.uuid.as_str());
    }

    let mut rows: Vec<DeviceRow> = users_per_device
        .into_iter()
        .map(|(device, users)| DeviceRow {
            device: device.to_string(),
            count: users.len() as u64,
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.device.cmp(&b.device)));
    rows
}

/// Distinct uuids per browser, descending by count. Events without a
/// browser are skipped, not bucketed.
pub fn browser_stats(events: &[VisitorEvent]) -> Vec<BrowserRow> {
    let mut users_per_browser: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for event in events {
        let Some(browser) = event.browser.as_deref() else { continue };
        if browser.is_empty() {
            continue;
        }
        users_per_browser
            .entry(browser)
            .or_default()
            .insert(event.uuid.as_str());
    }

    let mut rows: Vec<BrowserRow> = users_per_browser
        .into_iter()
        .map(|(browser, users)| BrowserRow {
            browser: browser.to_string(),
            count: users.len() as u64,
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.browser.cmp(&b.browser)));
    rows
}

// ── Tests ──────────────────────────────────────────────────────
