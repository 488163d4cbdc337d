//! Custom serde helpers for the store's wire formats.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a store timestamp into `DateTime<Utc>`.
///
/// The store writes RFC 3339 strings, but older rows carry SQL-style
/// `YYYY-MM-DD HH:MM:SS` values (implicitly UTC) or bare dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Deserializes a store timestamp string into `DateTime<Utc>`.
pub mod timestamp_str {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", raw)))
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_timestamp("2024-03-01T23:30:00+02:00").unwrap();
        assert_eq!((dt.day(), dt.hour()), (1, 21));
    }

    #[test]
    fn test_parse_sql_style_and_bare_date() {
        let dt = parse_timestamp("2024-05-07 08:15:00").unwrap();
        assert_eq!((dt.month(), dt.day(), dt.minute()), (5, 7, 15));
        let d = parse_timestamp("2023-12-31").unwrap();
        assert_eq!((d.year(), d.hour()), (2023, 0));
    }

    #[test]
    fn test_parse_garbage_is_none() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
