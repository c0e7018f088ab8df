//! Timestamp encoding.
//!
//! All instants are stored as UTC text in a fixed-width
//! `YYYY-MM-DDTHH:MM:SSZ` layout so that string comparison in SQL matches
//! chronological order. Dates are stored as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{DatabaseError, Result};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Encode an instant for storage.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Decode a stored instant.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::InvalidValue {
            field: "timestamp",
            reason: format!("{}: {}", value, e),
        })
}

/// Encode a calendar date for storage.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_roundtrip_drops_subseconds() {
        let at = Utc.with_ymd_and_hms(2025, 3, 9, 7, 5, 1).unwrap();
        let encoded = format_timestamp(at);
        assert_eq!(encoded, "2025-03-09T07:05:01Z");
        assert_eq!(parse_timestamp(&encoded).unwrap(), at);
    }

    #[test]
    fn test_lexical_order_matches_time_order() {
        let earlier = format_timestamp(Utc.with_ymd_and_hms(2025, 9, 30, 23, 59, 59).unwrap());
        let later = format_timestamp(Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap());
        assert!(earlier < later);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(DatabaseError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        assert_eq!(format_date(date), "2025-01-02");
    }
}
