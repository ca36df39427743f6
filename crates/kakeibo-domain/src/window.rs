//! Half-open time windows anchored to a civil UTC offset.

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Covers every instant in `[start, end)`. `start == end` is a valid, empty window.
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TimeWindowError> {
        if end < start {
            return Err(TimeWindowError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// The civil day `date` as observed at `offset`.
    pub fn day(date: NaiveDate, offset: FixedOffset) -> Self {
        let start = civil_midnight(date, offset);
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    /// The civil calendar month `year-month` as observed at `offset`.
    pub fn month(year: i32, month: u32, offset: FixedOffset) -> Result<Self, TimeWindowError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(TimeWindowError::InvalidMonth { year, month })?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or(TimeWindowError::InvalidMonth { year, month })?;
        Self::civil_days(first, next, offset)
    }

    /// Civil days from `first` up to, but excluding, `end_exclusive`.
    pub fn civil_days(
        first: NaiveDate,
        end_exclusive: NaiveDate,
        offset: FixedOffset,
    ) -> Result<Self, TimeWindowError> {
        Self::new(
            civil_midnight(first, offset),
            civil_midnight(end_exclusive, offset),
        )
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

fn civil_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let local = date.and_time(NaiveTime::MIN);
    let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
    Utc.from_utc_datetime(&utc)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors that can occur when constructing [`TimeWindow`] values.
pub enum TimeWindowError {
    InvalidRange,
    InvalidMonth { year: i32, month: u32 },
}

impl fmt::Display for TimeWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindowError::InvalidRange => f.write_str("time window end must not precede start"),
            TimeWindowError::InvalidMonth { year, month } => {
                write!(f, "invalid month {year}-{month:02}")
            }
        }
    }
}

impl std::error::Error for TimeWindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn jst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    #[test]
    fn day_window_starts_at_civil_midnight() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let window = TimeWindow::day(date, jst());
        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 10, 16, 15, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2026, 10, 17, 15, 0, 0).unwrap());
        assert!(window.contains(window.start));
        assert!(!window.contains(window.end));
    }

    #[test]
    fn december_rolls_into_next_year() {
        let window = TimeWindow::month(2026, 12, jst()).unwrap();
        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 11, 30, 15, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2026, 12, 31, 15, 0, 0).unwrap());
    }

    #[test]
    fn zero_width_windows_are_empty() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let window = TimeWindow::new(now, now).unwrap();
        assert!(!window.contains(now));
    }

    #[test]
    fn rejects_inverted_windows_and_bad_months() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            TimeWindow::new(now, now - Duration::seconds(1)),
            Err(TimeWindowError::InvalidRange)
        );
        assert_eq!(
            TimeWindow::month(2026, 13, jst()),
            Err(TimeWindowError::InvalidMonth {
                year: 2026,
                month: 13
            })
        );
    }
}
