//! Serde helpers for the dates the backend sends.
//!
//! Dates go out as `YYYY-MM-DD`. They come back either in that form or as a full timestamp such
//! as `2024-03-01T00:00:00.000Z` or `2024-03-01 08:30:00`. A timestamp with an offset is moved
//! to the hospital's local time first, so local midnight sent as UTC stays on its own day.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use std::sync::OnceLock;

pub(crate) const FORMAT: &str = "%Y-%m-%d";

/// Western Indonesian Time, UTC+7.
pub(crate) const DEFAULT_OFFSET_MINUTES: i32 = 7 * 60;

static LOCAL_OFFSET: OnceLock<FixedOffset> = OnceLock::new();

/// Used until a config sets another offset.
pub(crate) fn default_offset() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_OFFSET_MINUTES * 60).unwrap_or_else(|| Utc.fix())
}

/// Sets the offset timestamps are read in. Only the first call has an effect.
pub(crate) fn set_local_offset(offset: FixedOffset) {
    if LOCAL_OFFSET.set(offset).is_err() {
        tracing::trace!("The local offset is already set");
    }
}

fn local_offset() -> FixedOffset {
    LOCAL_OFFSET.get().copied().unwrap_or_else(default_offset)
}

pub fn parse(s: &str) -> Option<NaiveDate> {
    parse_in(s, local_offset())
}

/// Parses a date, reading timestamps that carry an offset as local time at `offset`.
pub fn parse_in(s: &str, offset: FixedOffset) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, FORMAT) {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&offset).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
}

pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.format(FORMAT).to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid date '{s}'")))
}

/// The same as the parent module, for `Option<NaiveDate>` fields.
pub mod option {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => super::serialize(d, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => super::parse(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid date '{s}'"))),
        }
    }
}
