//! Metadata-driven conversion between wire and in-memory contract values
//!
//! Wire shape: dates as ISO strings, enums as member names, collections
//! possibly wrapped in a `{ "value": [...], "count": N }` envelope.
//! In-memory shape: native dates, numeric (bitmask) enums.
//!
//! Every entry point comes in two flavours:
//! - `serialize` / `deserialize` borrow the input and never modify it. The
//!   result is `Cow::Borrowed(input)` when nothing had to change; otherwise
//!   a copy is taken lazily, at the first changed field, on every level
//!   that contains a change.
//! - `serialize_in_place` / `deserialize_in_place` update fields on the
//!   value itself and return whether anything changed.
//!
//! Conversion never fails. Unknown enum names count as 0, unparseable dates
//! become [`Value::InvalidDate`], shape mismatches pass through.

mod date;
mod enums;
mod field;
mod walker;

pub use date::{parse_date, DateRecovery};
pub use enums::resolve_flags;

use crate::shared::config::{ConverterConfig, RecoveryMode};
use crate::shared::metadata::TypeMetadata;
use crate::shared::value::{Key, Value};
use std::borrow::Cow;

/// Envelope property holding the wrapped collection
const WRAPPED_COLLECTION_KEY: &str = "value";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// In-memory -> wire
    Serialize,
    /// Wire -> in-memory
    Deserialize,
}

/// Settings shared by one traversal
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pass {
    pub direction: Direction,
    pub recovery: DateRecovery,
}

/// Entry point for converting contract values
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractConverter {
    recovery: DateRecovery,
    unwrap_wrapped: bool,
}

impl ContractConverter {
    pub fn new(recovery: DateRecovery) -> Self {
        Self {
            recovery,
            unwrap_wrapped: false,
        }
    }

    /// Build a converter from configuration.
    /// `user_agent` is only consulted when the date recovery mode is `detect`.
    pub fn from_config(config: &ConverterConfig, user_agent: Option<&str>) -> Self {
        let recovery = match config.dates.recovery {
            RecoveryMode::Standard => DateRecovery::Standard,
            RecoveryMode::Legacy => DateRecovery::Legacy,
            RecoveryMode::Detect => user_agent.map(DateRecovery::detect).unwrap_or_default(),
        };
        tracing::debug!("contract converter: date recovery {:?}", recovery);
        Self {
            recovery,
            unwrap_wrapped: config.collections.unwrap_wrapped,
        }
    }

    pub fn date_recovery(&self) -> DateRecovery {
        self.recovery
    }

    /// Configured default for envelope unwrapping
    pub fn unwraps_collections(&self) -> bool {
        self.unwrap_wrapped
    }

    fn pass(&self, direction: Direction) -> Pass {
        Pass {
            direction,
            recovery: self.recovery,
        }
    }

    // ========================================================================
    // Serialize
    // ========================================================================

    /// In-memory -> wire, leaving `data` untouched
    pub fn serialize<'a>(&self, data: &'a Value, meta: Option<&TypeMetadata>) -> Cow<'a, Value> {
        let Some(meta) = meta else {
            return Cow::Borrowed(data);
        };
        match self.pass(Direction::Serialize).walk(data, meta) {
            Some(converted) => Cow::Owned(converted),
            None => Cow::Borrowed(data),
        }
    }

    /// In-memory -> wire, updating `data` in place
    pub fn serialize_in_place(&self, data: &mut Value, meta: Option<&TypeMetadata>) -> bool {
        match meta {
            Some(meta) => self.pass(Direction::Serialize).walk_mut(data, meta),
            None => false,
        }
    }

    // ========================================================================
    // Deserialize
    // ========================================================================

    /// Wire -> in-memory, leaving `data` untouched.
    /// With `unwrap_wrapped`, an envelope object is replaced by its `value`
    /// array before conversion.
    pub fn deserialize<'a>(
        &self,
        data: &'a Value,
        meta: Option<&TypeMetadata>,
        unwrap_wrapped: bool,
    ) -> Cow<'a, Value> {
        if data.is_falsy() {
            return Cow::Borrowed(data);
        }
        let data = if unwrap_wrapped {
            unwrap_collection(data)
        } else {
            data
        };
        let Some(meta) = meta else {
            return Cow::Borrowed(data);
        };
        match self.pass(Direction::Deserialize).walk(data, meta) {
            Some(converted) => Cow::Owned(converted),
            None => Cow::Borrowed(data),
        }
    }

    /// Wire -> in-memory, updating `data` in place
    pub fn deserialize_in_place(
        &self,
        data: &mut Value,
        meta: Option<&TypeMetadata>,
        unwrap_wrapped: bool,
    ) -> bool {
        if data.is_falsy() {
            return false;
        }
        let unwrapped = unwrap_wrapped && unwrap_collection_in_place(data);
        let converted = match meta {
            Some(meta) => self.pass(Direction::Deserialize).walk_mut(data, meta),
            None => false,
        };
        unwrapped || converted
    }
}

/// In-memory -> wire with the default converter
pub fn serialize<'a>(data: &'a Value, meta: Option<&TypeMetadata>) -> Cow<'a, Value> {
    ContractConverter::default().serialize(data, meta)
}

/// Wire -> in-memory with the default converter
pub fn deserialize<'a>(
    data: &'a Value,
    meta: Option<&TypeMetadata>,
    unwrap_wrapped: bool,
) -> Cow<'a, Value> {
    ContractConverter::default().deserialize(data, meta, unwrap_wrapped)
}

fn unwrap_collection(data: &Value) -> &Value {
    match data.get(WRAPPED_COLLECTION_KEY) {
        Some(inner @ Value::Array(_)) => inner,
        _ => data,
    }
}

fn unwrap_collection_in_place(data: &mut Value) -> bool {
    let Value::Object(map) = data else {
        return false;
    };
    let key = Key::from(WRAPPED_COLLECTION_KEY);
    if !matches!(map.get(&key), Some(Value::Array(_))) {
        return false;
    }
    match map.remove(&key) {
        Some(inner) => {
            *data = inner;
            true
        }
        None => false,
    }
}
