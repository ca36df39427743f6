//! Clock abstraction and helpers for the fixed civil timezone.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};

use crate::CoreError;

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

const MAX_OFFSET_HOURS: i32 = 23;

/// Builds the civil offset from whole hours east of UTC.
pub fn civil_offset(hours: i32) -> Result<FixedOffset, CoreError> {
    if hours.abs() > MAX_OFFSET_HOURS {
        return Err(CoreError::Validation(format!(
            "UTC offset must be between -{MAX_OFFSET_HOURS} and {MAX_OFFSET_HOURS} hours (got {hours})"
        )));
    }
    FixedOffset::east_opt(hours * 3600)
        .ok_or_else(|| CoreError::Validation(format!("invalid UTC offset {hours}")))
}

pub fn civil_now(clock: &dyn Clock, offset: FixedOffset) -> DateTime<FixedOffset> {
    clock.now().with_timezone(&offset)
}

pub fn civil_today(clock: &dyn Clock, offset: FixedOffset) -> NaiveDate {
    civil_now(clock, offset).date_naive()
}

/// Days left in `date`'s month, counting `date` itself.
pub fn days_left_in_month(date: NaiveDate) -> i64 {
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    next_month
        .map(|first| (first - date).num_days())
        .unwrap_or(1)
}

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Parses wall-clock input in the civil timezone. A bare date means midnight.
pub fn parse_civil_timestamp(input: &str, offset: FixedOffset) -> Result<DateTime<Utc>, CoreError> {
    let trimmed = input.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.with_timezone(&Utc));
    }
    let naive = TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "invalid timestamp `{trimmed}` (use YYYY-MM-DD HH:MM)"
            ))
        })?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| CoreError::Validation(format!("ambiguous timestamp `{trimmed}`")))
}

pub fn parse_civil_date(input: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!("invalid date `{}` (use YYYY-MM-DD)", input.trim()))
    })
}

/// Parses `YYYY-MM` into a year and month.
pub fn parse_year_month(input: &str) -> Result<(i32, u32), CoreError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .map(|date| (date.year(), date.month()))
        .map_err(|_| CoreError::Validation(format!("invalid month `{trimmed}` (use YYYY-MM)")))
}
