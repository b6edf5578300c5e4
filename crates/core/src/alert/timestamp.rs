//! Normalization of alert creation timestamps.
//!
//! The source table stores `dateAlertCreated` either as a string (RFC 3339,
//! naive date-time or plain date) or as a number of seconds/milliseconds
//! since the Unix epoch. Everything is normalized to a naive UTC timestamp.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::AlertError;

/// Epoch values at or above this magnitude are read as milliseconds.
///
/// `100_000_000_000` seconds is in the year 5138, while the same number of
/// milliseconds is in 1973.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a string timestamp into a naive UTC timestamp.
///
/// Accepted forms, in order: RFC 3339 (offset converted to UTC),
/// `YYYY-MM-DD HH:MM:SS[.f]`, `YYYY-MM-DDTHH:MM:SS[.f]` and `YYYY-MM-DD`.
pub fn parse_alert_timestamp(value: &str) -> Result<NaiveDateTime, AlertError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| AlertError::InvalidTimestamp(value.to_string()))
}

/// Converts an epoch number (seconds or milliseconds) into a naive UTC timestamp.
pub fn timestamp_from_epoch(value: i64) -> Result<NaiveDateTime, AlertError> {
    let (secs, nanos) = if value.unsigned_abs() >= EPOCH_MILLIS_THRESHOLD as u64 {
        (
            value.div_euclid(1_000),
            (value.rem_euclid(1_000) * 1_000_000) as u32,
        )
    } else {
        (value, 0)
    };

    DateTime::from_timestamp(secs, nanos)
        .map(|dt| dt.naive_utc())
        .ok_or(AlertError::EpochOutOfRange(value))
}

/// Formats a timestamp as an RFC 3339 UTC string with millisecond precision.
pub fn format_alert_timestamp(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        let parsed = parse_alert_timestamp("2024-03-01T12:30:00-03:00").unwrap();
        assert_eq!(parsed, at(2024, 3, 1, 15, 30, 0));
    }

    #[test]
    fn test_parse_rfc3339_zulu() {
        let parsed = parse_alert_timestamp("2024-03-01T12:30:00.250Z").unwrap();
        assert_eq!(parsed.and_utc().timestamp_millis() % 1_000, 250);
    }

    #[test]
    fn test_parse_naive_with_space() {
        let parsed = parse_alert_timestamp("2024-03-01 08:00:05").unwrap();
        assert_eq!(parsed, at(2024, 3, 1, 8, 0, 5));
    }

    #[test]
    fn test_parse_naive_with_t_and_fraction() {
        let parsed = parse_alert_timestamp("2024-03-01T08:00:05.123").unwrap();
        assert_eq!(parsed.date(), at(2024, 3, 1, 0, 0, 0).date());
        assert_eq!(parsed.and_utc().timestamp_subsec_millis(), 123);
    }

    #[test]
    fn test_parse_plain_date_is_midnight() {
        let parsed = parse_alert_timestamp("2024-03-01").unwrap();
        assert_eq!(parsed, at(2024, 3, 1, 0, 0, 0));
    }

    #[test]
    fn test_parse_garbage_is_rejected() {
        assert_eq!(
            parse_alert_timestamp("last tuesday"),
            Err(AlertError::InvalidTimestamp("last tuesday".to_string()))
        );
    }

    #[test]
    fn test_epoch_seconds() {
        assert_eq!(
            timestamp_from_epoch(1_709_296_200).unwrap(),
            at(2024, 3, 1, 12, 30, 0)
        );
    }

    #[test]
    fn test_epoch_millis() {
        let parsed = timestamp_from_epoch(1_709_296_200_500).unwrap();
        assert_eq!(parsed.and_utc().timestamp(), 1_709_296_200);
        assert_eq!(parsed.and_utc().timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_epoch_out_of_range() {
        assert_eq!(
            timestamp_from_epoch(i64::MAX),
            Err(AlertError::EpochOutOfRange(i64::MAX))
        );
    }

    #[test]
    fn test_format_is_parseable() {
        let original = at(2023, 12, 31, 23, 59, 59);
        let formatted = format_alert_timestamp(&original);

        assert_eq!(formatted, "2023-12-31T23:59:59.000Z");
        assert_eq!(parse_alert_timestamp(&formatted).unwrap(), original);
    }
}
