//! Conversion between calendar dates and epoch timestamps.
//!
//! The task service reports timestamps either as integers or as numeric
//! strings, and mixes second and millisecond resolution. Values above
//! [`MILLIS_THRESHOLD`] are treated as milliseconds since no plausible
//! second-resolution timestamp is that large.

use super::TimestampError;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Write as _};

/// Format used for full timestamps.
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format used for date-only columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Placeholder rendered for absent timestamps.
pub const MISSING_TIMESTAMP: &str = "-";

/// Magnitude above which a timestamp is read as milliseconds.
pub const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

const MILLIS_PER_SECOND: i64 = 1000;

/// Raw epoch value as delivered by the task service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EpochValue {
    /// Integer timestamp.
    Integer(i64),
    /// Timestamp encoded as a decimal string.
    Text(String),
}

impl EpochValue {
    /// Reads an epoch value out of an arbitrary JSON value.
    ///
    /// Returns `Ok(None)` for JSON `null`.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::InvalidTimestamp`] for booleans, arrays,
    /// objects and non-integral numbers.
    pub fn from_json(value: &Value) -> Result<Option<Self>, TimestampError> {
        match value {
            Value::Null => Ok(None),
            Value::String(text) => Ok(Some(Self::Text(text.clone()))),
            Value::Number(number) => number
                .as_i64()
                .map(|raw| Some(Self::Integer(raw)))
                .ok_or_else(|| TimestampError::InvalidTimestamp {
                    input: number.to_string(),
                }),
            other => Err(TimestampError::InvalidTimestamp {
                input: other.to_string(),
            }),
        }
    }

    /// Returns the raw integer, parsing textual values.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::InvalidTimestamp`] when a textual value is
    /// not an integer.
    pub fn as_i64(&self) -> Result<i64, TimestampError> {
        match self {
            Self::Integer(raw) => Ok(*raw),
            Self::Text(text) => {
                text.trim()
                    .parse()
                    .map_err(|_| TimestampError::InvalidTimestamp {
                        input: text.clone(),
                    })
            }
        }
    }

    /// Returns whole seconds since the epoch, normalizing millisecond input.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::InvalidTimestamp`] when a textual value is
    /// not an integer.
    pub fn to_seconds(&self) -> Result<i64, TimestampError> {
        let raw = self.as_i64()?;
        if raw > MILLIS_THRESHOLD {
            Ok(raw.div_euclid(MILLIS_PER_SECOND))
        } else {
            Ok(raw)
        }
    }

    /// Returns milliseconds since the epoch, scaling second input.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError::InvalidTimestamp`] for non-integer text and
    /// [`TimestampError::OutOfRange`] when scaling overflows.
    pub fn to_millis(&self) -> Result<i64, TimestampError> {
        let raw = self.as_i64()?;
        if raw > MILLIS_THRESHOLD {
            Ok(raw)
        } else {
            raw.checked_mul(MILLIS_PER_SECOND)
                .ok_or(TimestampError::OutOfRange(raw))
        }
    }
}

impl From<i64> for EpochValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for EpochValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl fmt::Display for EpochValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(raw) => write!(f, "{raw}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Parses a `YYYY-MM-DD` date as local midnight and returns epoch seconds.
///
/// # Errors
///
/// Returns [`TimestampError::InvalidDate`] when the input does not match the
/// pattern, or [`TimestampError::NonexistentLocalTime`] when local midnight
/// is skipped by a zone transition.
///
/// # Examples
///
/// ```
/// use taskflat::report::domain::{DATE_FORMAT, date_to_epoch_seconds, epoch_to_date_string};
///
/// let seconds = date_to_epoch_seconds("2024-03-15").expect("valid date");
/// let rendered = epoch_to_date_string(Some(&seconds.into()), DATE_FORMAT).expect("formats");
/// assert_eq!(rendered, "2024-03-15");
/// ```
pub fn date_to_epoch_seconds(date: &str) -> Result<i64, TimestampError> {
    date_to_epoch_seconds_in(date, &Local)
}

/// Parses a `YYYY-MM-DD` date as midnight in `zone` and returns epoch
/// seconds.
///
/// # Errors
///
/// See [`date_to_epoch_seconds`].
pub fn date_to_epoch_seconds_in<Tz: TimeZone>(
    date: &str,
    zone: &Tz,
) -> Result<i64, TimestampError> {
    let day = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| {
        TimestampError::InvalidDate {
            input: date.to_owned(),
        }
    })?;
    let midnight = day.and_time(NaiveTime::MIN);
    zone.from_local_datetime(&midnight)
        .earliest()
        .map(|instant| instant.timestamp())
        .ok_or_else(|| TimestampError::NonexistentLocalTime {
            input: date.to_owned(),
        })
}

/// Renders an epoch value in local time using a strftime-style `format`.
///
/// Absent values render as [`MISSING_TIMESTAMP`].
///
/// # Errors
///
/// Returns [`TimestampError`] when a textual value is not an integer, the
/// value is out of range, or the pattern is invalid.
pub fn epoch_to_date_string(
    timestamp: Option<&EpochValue>,
    format: &str,
) -> Result<String, TimestampError> {
    epoch_to_date_string_in(timestamp, format, &Local)
}

/// Renders an epoch value in `zone` using a strftime-style `format`.
///
/// # Errors
///
/// See [`epoch_to_date_string`].
pub fn epoch_to_date_string_in<Tz>(
    timestamp: Option<&EpochValue>,
    format: &str,
    zone: &Tz,
) -> Result<String, TimestampError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let Some(value) = timestamp else {
        return Ok(MISSING_TIMESTAMP.to_owned());
    };
    let seconds = value.to_seconds()?;
    let instant = DateTime::<Utc>::from_timestamp(seconds, 0)
        .ok_or(TimestampError::OutOfRange(seconds))?
        .with_timezone(zone);

    let mut rendered = String::new();
    write!(rendered, "{}", instant.format(format)).map_err(|_| {
        TimestampError::InvalidPattern {
            pattern: format.to_owned(),
        }
    })?;
    Ok(rendered)
}
