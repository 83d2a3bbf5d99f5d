//! Lenient timestamp parsing for user-supplied and legacy dates.
//!
//! Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM[:SS]` timestamps
//! (taken as UTC) and bare `YYYY-MM-DD` dates (midnight UTC).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

pub fn parse_flexible(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| format!("Invalid date '{}': expected YYYY-MM-DD or ISO-8601", raw))
}

pub mod flexible_datetime {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_flexible(&raw).map_err(serde::de::Error::custom)
    }
}

pub mod option_flexible_datetime {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => super::parse_flexible(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_flexible("2024-01-15T14:30:00.000Z").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T14:30:00+00:00");

        let offset = parse_flexible("2024-01-15T16:30:00+02:00").unwrap();
        assert_eq!(offset, dt);
    }

    #[test]
    fn test_parse_date_only_is_midnight_utc() {
        let dt = parse_flexible("2024-01-15").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T00:00:00+00:00");
    }

    #[test]
    fn test_parse_naive_datetime() {
        let dt = parse_flexible("2024-01-15T08:05").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T08:05:00+00:00");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_flexible("yesterday").is_err());
        assert!(parse_flexible("").is_err());
    }
}
