//! Timestamp encoding shared by the storage backends.

use chrono::{DateTime, SecondsFormat, Utc};

/// Encodes a timestamp in the sortable text form used by every backend.
///
/// All values share the `Z` suffix and second precision, so lexical order equals
/// chronological order.
pub fn format_stored_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Decodes a timestamp previously written by [`format_stored_timestamp`].
///
/// Values carrying another offset are accepted and normalised to UTC.
pub fn parse_stored_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|value| value.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn stored_timestamps_sort_chronologically() {
        let earlier = Utc.with_ymd_and_hms(2026, 9, 30, 23, 59, 59).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
        assert!(format_stored_timestamp(&earlier) < format_stored_timestamp(&later));
        assert_eq!(format_stored_timestamp(&later), "2026-10-01T00:00:00Z");
    }

    #[test]
    fn offset_timestamps_normalise_to_utc() {
        let parsed = parse_stored_timestamp("2026-10-17T09:00:00+09:00").expect("valid");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap());
        assert!(parse_stored_timestamp("yesterday").is_none());
    }
}
