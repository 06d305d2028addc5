//! Timestamp input
//!
//! Clients send either RFC 3339 (`2024-05-01T09:00:00Z`) or a bare local
//! form with no offset (`2024-05-01T09:00:00`, `2024-05-01 09:00:00`). The
//! bare form is read as UTC.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A timestamp accepted with or without an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcTimestamp(pub DateTime<Utc>);

impl UtcTimestamp {
    pub fn parse(raw: &str) -> Result<Self, InvalidTimestamp> {
        let raw = raw.trim();

        if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self(zoned.with_timezone(&Utc)));
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| Self(Utc.from_utc_datetime(&naive)))
            .ok_or_else(|| InvalidTimestamp(raw.to_owned()))
    }

    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

impl From<UtcTimestamp> for DateTime<Utc> {
    fn from(ts: UtcTimestamp) -> Self {
        ts.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTimestamp(String);

impl fmt::Display for InvalidTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid timestamp {:?}", self.0)
    }
}

impl<'de> Deserialize<'de> for UtcTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}

/// `deserialize_with` for a required `DateTime<Utc>` field.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    UtcTimestamp::deserialize(deserializer).map(UtcTimestamp::into_inner)
}

/// `deserialize_with` for an optional field; pair with `#[serde(default)]`.
pub fn deserialize_option<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(Option::<UtcTimestamp>::deserialize(deserializer)?.map(UtcTimestamp::into_inner))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(raw: &str) -> DateTime<Utc> {
        raw.parse().unwrap()
    }

    #[test]
    fn parses_rfc3339() {
        let ts = UtcTimestamp::parse("2024-05-01T09:00:00Z").unwrap();
        assert_eq!(ts.into_inner(), utc("2024-05-01T09:00:00Z"));
    }

    #[test]
    fn converts_offsets_to_utc() {
        let ts = UtcTimestamp::parse("2024-05-01T11:00:00+02:00").unwrap();
        assert_eq!(ts.into_inner(), utc("2024-05-01T09:00:00Z"));
    }

    #[test]
    fn naive_is_read_as_utc() {
        let expected = utc("2024-05-01T09:00:00Z");
        assert_eq!(UtcTimestamp::parse("2024-05-01T09:00:00").unwrap().0, expected);
        assert_eq!(UtcTimestamp::parse("2024-05-01 09:00:00").unwrap().0, expected);
        assert_eq!(
            UtcTimestamp::parse("2024-05-01T09:00:00.250").unwrap().0,
            utc("2024-05-01T09:00:00.250Z")
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(UtcTimestamp::parse("yesterday").is_err());
        assert!(UtcTimestamp::parse("2024-05-01").is_err());
        assert!(serde_json::from_str::<UtcTimestamp>("1714554000").is_err());
    }
}
