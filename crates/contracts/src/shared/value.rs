//! In-memory value tree for contract objects
//!
//! Mirrors the JSON data model with two additions: native dates and
//! non-text map keys (produced when dictionary keys are converted).

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Number;
use std::collections::BTreeMap;

/// Ordered map used for both contract objects and dictionaries
pub type Map = BTreeMap<Key, Value>;

/// A contract value, either wire-shaped or in-memory-shaped
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Native date (UTC, millisecond precision on the wire)
    Date(DateTime<Utc>),
    /// Date text that could not be parsed into a representable date
    InvalidDate,
    Array(Vec<Value>),
    Object(Map),
}

/// Key of an object or dictionary entry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Text(String),
    Number(i64),
    Date(DateTime<Utc>),
}

/// Render a date the way the wire expects it: `YYYY-MM-DDTHH:mm:ss.sssZ`
pub fn format_wire_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Value {
    /// Wire-language truthiness: null, false, zero, NaN and "" are falsy
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64().map_or(true, |f| f == 0.0 || f.is_nan()),
            Value::String(s) => s.is_empty(),
            Value::Date(_) | Value::InvalidDate | Value::Array(_) | Value::Object(_) => false,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(date) => Some(date),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Look up an object field by name
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_object()
            .and_then(|map| map.get(&Key::Text(field.to_string())))
    }
}

impl Key {
    /// Keys follow the same truthiness rule as values
    pub fn is_falsy(&self) -> bool {
        match self {
            Key::Text(s) => s.is_empty(),
            Key::Number(n) => *n == 0,
            Key::Date(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Key::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Textual form used when the key goes back onto the wire
    pub fn to_wire_text(&self) -> String {
        match self {
            Key::Text(s) => s.clone(),
            Key::Number(n) => n.to_string(),
            Key::Date(d) => format_wire_date(d),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(date: DateTime<Utc>) -> Self {
        Value::Date(date)
    }
}

// ============================================================================
// JSON bridge
// ============================================================================

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (Key::Text(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null | Value::InvalidDate => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => serde_json::Value::Number(n),
            Value::String(s) => serde_json::Value::String(s),
            Value::Date(d) => serde_json::Value::String(format_wire_date(&d)),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k.to_wire_text(), v.into()))
                    .collect(),
            ),
        }
    }
}
