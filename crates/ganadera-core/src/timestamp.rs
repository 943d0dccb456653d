//! Serde helpers for `fecha_registro` columns.
//!
//! The store returns `timestamp` columns either with an offset
//! (`2024-03-01T12:30:00+00:00`) or without one (`2024-03-01T12:30:00.123456`).
//! Both read as UTC. Writes always use RFC 3339.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parses a wire timestamp, treating a missing offset as UTC.
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Micros, true))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
}

/// Same as the parent module, for nullable columns.
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => super::serialize(dt, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_with_and_without_offset() {
        let with_offset = parse("2024-03-01T12:30:00+02:00").unwrap();
        assert_eq!(with_offset.hour(), 10);

        let naive = parse("2024-03-01T12:30:00.123456").unwrap();
        assert_eq!(naive.hour(), 12);
        assert_eq!(naive.day(), 1);

        let spaced = parse("2024-03-01 12:30:00").unwrap();
        assert_eq!(spaced.minute(), 30);

        assert!(parse("yesterday").is_none());
    }

    #[test]
    fn test_writes_rfc3339_utc() {
        let dt = parse("2024-03-01T12:30:00Z").unwrap();
        let value = serde_json::to_value(Wrapper { at: dt }).unwrap();
        assert_eq!(value["at"], "2024-03-01T12:30:00.000000Z");
    }

    #[derive(serde::Serialize)]
    struct Wrapper {
        #[serde(with = "crate::timestamp")]
        at: DateTime<Utc>,
    }
}
