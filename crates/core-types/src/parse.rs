use crate::error::CoreError;
use chrono::{NaiveDate, NaiveDateTime};
use std::str::FromStr;

/// Timestamp layouts seen in the source exports, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a naive timestamp from one of the accepted textual layouts.
///
/// A bare date (`2018-01-03`) is read as midnight. Blank input is `Ok(None)`:
/// an empty cell is missing data, not malformed data.
pub fn parse_timestamp(raw: &str) -> Result<Option<NaiveDateTime>, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Some(ts));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(Some)
        .ok_or_else(|| CoreError::Timestamp(raw.to_string()))
}

/// Parses an optional numeric cell. Blank input is `Ok(None)`.
pub fn parse_number<T: FromStr>(column: &str, raw: &str) -> Result<Option<T>, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(|_| CoreError::InvalidInput(column.to_string(), raw.to_string()))
}
