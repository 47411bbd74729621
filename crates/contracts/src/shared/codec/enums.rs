//! Enum leaf conversion
//!
//! The wire carries member names (possibly several, comma-separated, for
//! flag enums); memory carries the OR-ed integer value. Only the
//! deserialize direction resolves names: numeric values are accepted by
//! the wire as is, so serialize passes everything through.

use super::Direction;
use crate::shared::metadata::EnumMetadata;
use crate::shared::value::{Key, Value};

pub(crate) fn convert_enum(meta: &EnumMetadata, value: &Value, direction: Direction) -> Option<Value> {
    match (direction, value) {
        (Direction::Deserialize, Value::String(text)) => Some(Value::from(resolve_flags(meta, text))),
        _ => None,
    }
}

pub(crate) fn convert_enum_key(meta: &EnumMetadata, key: &Key, direction: Direction) -> Option<Key> {
    match (direction, key) {
        (Direction::Deserialize, Key::Text(text)) => Some(Key::Number(resolve_flags(meta, text))),
        _ => None,
    }
}

/// Resolve `"A, b ,C"` into `A | B | C`.
/// Unknown names contribute nothing, so a fully unknown input yields 0.
pub fn resolve_flags(meta: &EnumMetadata, text: &str) -> i64 {
    text.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .fold(0, |acc, name| match meta.resolve(name) {
            Some(value) => acc | value,
            None => {
                tracing::trace!("enum member '{}' not found, ignored", name);
                acc
            }
        })
}
