//! Lenient date and timestamp parsing for exported CSV columns.
//!
//! Sentiment exports usually carry plain `YYYY-MM-DD` dates while trade
//! exports mix ISO timestamps, day-first exchange formats and epoch values.
//! Everything is reduced to a naive wall-clock time; offsets are dropped
//! so that truncating to a day keeps the exporter's calendar date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%m/%d/%Y"];

/// Parses a timestamp in any of the supported layouts.
///
/// Bare dates resolve to midnight. All-digit values of 13 or 10 digits are
/// read as epoch milliseconds or seconds.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if value.bytes().all(|b| b.is_ascii_digit()) {
        return parse_epoch(value);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Parses a value and truncates it to its calendar day.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    parse_timestamp(value).map(|dt| dt.date())
}

fn parse_epoch(digits: &str) -> Option<NaiveDateTime> {
    let raw: i64 = digits.parse().ok()?;
    match digits.len() {
        13 => DateTime::from_timestamp_millis(raw).map(|dt| dt.naive_utc()),
        10 => DateTime::from_timestamp(raw, 0).map(|dt| dt.naive_utc()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn iso_date() {
        assert_eq!(parse_date("2024-01-01"), Some(date(2024, 1, 1)));
    }

    #[test]
    fn iso_timestamp_truncates_to_day() {
        let ts = parse_timestamp("2024-01-01 23:59:59").unwrap();
        assert_eq!(ts.date(), date(2024, 1, 1));
        assert_eq!(parse_date("2024-01-01T08:15:00.250"), Some(date(2024, 1, 1)));
    }

    #[test]
    fn rfc3339_keeps_wall_clock_date() {
        assert_eq!(parse_date("2024-01-01T23:30:00+05:30"), Some(date(2024, 1, 1)));
        assert_eq!(parse_date("2024-01-02T00:10:00Z"), Some(date(2024, 1, 2)));
    }

    #[test]
    fn day_first_exchange_export() {
        assert_eq!(parse_date("02-12-2024 22:50"), Some(date(2024, 12, 2)));
    }

    #[test]
    fn us_slash_dates() {
        assert_eq!(parse_date("03/15/2024"), Some(date(2024, 3, 15)));
    }

    #[test]
    fn epoch_millis_and_seconds() {
        assert_eq!(parse_date("1704067200000"), Some(date(2024, 1, 1)));
        assert_eq!(parse_date("1704067200"), Some(date(2024, 1, 1)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("12345"), None);
        assert_eq!(parse_timestamp("2024-13-45"), None);
    }
}
