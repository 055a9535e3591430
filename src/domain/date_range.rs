//! Inclusive calendar date ranges for analytics queries

use chrono::{Duration, NaiveDate, Utc};

use super::error::{DomainError, DomainResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive `[start, end]` range of calendar days.
///
/// Bounds are compared and stored as dates but applied to the event
/// store as textual prefixes: ISO-8601 date-times sort
/// lexicographically, so `date >= "2025-01-01" AND date < "2025-01-08"`
/// selects exactly the days 1 through 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Builds a range from two dates, swapping them when reversed so
    /// the result is always ordered.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// The default query window: the 30 days ending today (UTC).
    pub fn last_30_days() -> Self {
        let today = Utc::now().date_naive();
        Self {
            start: today - Duration::days(30),
            end: today,
        }
    }

    /// Parses optional `YYYY-MM-DD` query parameters. When either bound
    /// is missing the whole range falls back to the last 30 days.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> DomainResult<Self> {
        match (start, end) {
            (Some(start), Some(end)) => {
                let start = parse_date(start)?;
                let end = parse_date(end)?;
                Ok(Self::new(start, end))
            }
            _ => Ok(Self::last_30_days()),
        }
    }

    /// Inclusive lower bound as a textual prefix.
    pub fn lower_bound(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// Exclusive upper bound: the day after `end`. Saturates at the
    /// calendar maximum, where the range degenerates to a point.
    pub fn upper_bound(&self) -> String {
        self.end
            .succ_opt()
            .unwrap_or(self.end)
            .format(DATE_FORMAT)
            .to_string()
    }
}

fn parse_date(raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| DomainError::validation("Invalid date format. Use YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let range = DateRange::new(date("2025-03-10"), date("2025-03-01"));
        assert_eq!(range.start, date("2025-03-01"));
        assert_eq!(range.end, date("2025-03-10"));
    }

    #[test]
    fn bounds_are_inclusive_start_exclusive_next_day() {
        let range = DateRange::new(date("2025-01-01"), date("2025-01-07"));
        assert_eq!(range.lower_bound(), "2025-01-01");
        assert_eq!(range.upper_bound(), "2025-01-08");
    }

    #[test]
    fn upper_bound_crosses_month_end() {
        let range = DateRange::new(date("2025-01-31"), date("2025-01-31"));
        assert_eq!(range.upper_bound(), "2025-02-01");
    }

    #[test]
    fn parse_requires_both_bounds() {
        let parsed = DateRange::parse(Some("2025-01-01"), None).unwrap();
        let fallback = DateRange::last_30_days();
        assert_eq!(parsed, fallback);

        let parsed = DateRange::parse(None, Some("2025-01-01")).unwrap();
        assert_eq!(parsed, fallback);
    }

    #[test]
    fn parse_rejects_malformed_dates() {
        let err = DateRange::parse(Some("01/02/2025"), Some("2025-01-05")).unwrap_err();
        assert!(err.to_string().contains("Invalid date format"));
    }

    #[test]
    fn parse_swaps_reversed_input() {
        let range = DateRange::parse(Some("2025-05-20"), Some("2025-05-01")).unwrap();
        assert_eq!(range.start, date("2025-05-01"));
        assert_eq!(range.end, date("2025-05-20"));
    }
}
