//! Date leaf conversion
//!
//! Serialize: native date -> `YYYY-MM-DDTHH:mm:ss.sssZ`.
//! Deserialize: text -> native date, with an optional recovery path for
//! legacy environments whose date parser rejects ISO timestamps.

use super::Direction;
use crate::shared::value::{format_wire_date, Key, Value};
use chrono::{DateTime, Duration, DurationRound, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static LEGACY_DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)-(\d+)-(\d+)T(\d+):(\d+):(\d+).(\d+)Z")
        .expect("legacy date pattern is a valid regex")
});

/// User agent fragment identifying old Internet Explorer builds
const LEGACY_USER_AGENT_SIGNATURE: &str = "MSIE ";

/// How unparseable date text is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRecovery {
    /// Failed parse yields [`Value::InvalidDate`]
    #[default]
    Standard,
    /// Failed parse is retried against the fixed legacy pattern;
    /// a mismatch yields [`Value::Null`]
    Legacy,
}

impl DateRecovery {
    /// Pick the recovery mode for the environment described by `user_agent`
    pub fn detect(user_agent: &str) -> Self {
        if user_agent.contains(LEGACY_USER_AGENT_SIGNATURE) {
            Self::Legacy
        } else {
            Self::Standard
        }
    }
}

pub(crate) fn convert_date(value: &Value, direction: Direction, recovery: DateRecovery) -> Option<Value> {
    match (direction, value) {
        (Direction::Serialize, Value::Date(date)) => Some(Value::String(format_wire_date(date))),
        (Direction::Deserialize, Value::String(text)) => Some(parse_date(text, recovery)),
        _ => None,
    }
}

/// Dictionary keys only change when the text parses into a valid date
pub(crate) fn convert_date_key(key: &Key, direction: Direction, recovery: DateRecovery) -> Option<Key> {
    match (direction, key) {
        (Direction::Serialize, Key::Date(date)) => Some(Key::Text(format_wire_date(date))),
        (Direction::Deserialize, Key::Text(text)) => match parse_date(text, recovery) {
            Value::Date(date) => Some(Key::Date(date)),
            _ => None,
        },
        _ => None,
    }
}

/// Parse wire text into a date value; never fails
pub fn parse_date(text: &str, recovery: DateRecovery) -> Value {
    if let Some(date) = parse_standard(text) {
        return Value::Date(date);
    }
    match recovery {
        DateRecovery::Standard => Value::InvalidDate,
        DateRecovery::Legacy => {
            tracing::debug!("standard date parse failed for '{}', trying legacy pattern", text);
            parse_legacy(text).map_or(Value::Null, Value::Date)
        }
    }
}

/// In-memory dates carry millisecond precision, like the wire format
fn parse_standard(text: &str) -> Option<DateTime<Utc>> {
    parse_iso(text).map(|date| date.duration_trunc(Duration::milliseconds(1)).unwrap_or(date))
}

fn parse_iso(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    // Zone-less timestamps are read as UTC
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_legacy(text: &str) -> Option<DateTime<Utc>> {
    let Some(caps) = LEGACY_DATE_PATTERN.captures(text) else {
        tracing::debug!("legacy date pattern does not match '{}'", text);
        return None;
    };
    let part = |index: usize| caps.get(index).and_then(|m| m.as_str().parse::<i64>().ok());

    let date = compose_utc(part(1)?, part(2)?, part(3)?, part(4)?, part(5)?, part(6)?, part(7)?);
    if date.is_none() {
        tracing::debug!("legacy date components overflow in '{}'", text);
    }
    date
}

/// Build a UTC date from calendar components, carrying out-of-range values
/// into the next unit (month 13 is January of the next year, hour 24 the
/// next day). Only arithmetic overflow yields `None`.
fn compose_utc(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    millis: i64,
) -> Option<DateTime<Utc>> {
    // Wire months are 1-based
    let months = year.checked_mul(12)?.checked_add(month - 1)?;
    let first_of_month = NaiveDate::from_ymd_opt(
        i32::try_from(months.div_euclid(12)).ok()?,
        u32::try_from(months.rem_euclid(12) + 1).ok()?,
        1,
    )?
    .and_hms_opt(0, 0, 0)?;

    let offsets = [
        Duration::try_days(day - 1)?,
        Duration::try_hours(hour)?,
        Duration::try_minutes(minute)?,
        Duration::try_seconds(second)?,
        Duration::try_milliseconds(millis)?,
    ];
    offsets
        .into_iter()
        .try_fold(first_of_month, |at, offset| at.checked_add_signed(offset))
        .map(|naive| naive.and_utc())
}
