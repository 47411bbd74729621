//! Object/array walker
//!
//! Two flavours of the same traversal:
//! - `walk` never touches its input and returns `Some(new)` only when
//!   something changed; copies are taken lazily on the first change;
//! - `walk_mut` updates fields in place and reports whether anything changed.

use super::Pass;
use crate::shared::metadata::TypeMetadata;
use crate::shared::value::{Key, Map, Value};

impl Pass {
    pub(crate) fn walk(&self, value: &Value, meta: &TypeMetadata) -> Option<Value> {
        if value.is_falsy() {
            return None;
        }
        match value {
            Value::Array(items) => map_array(items, |item| self.walk(item, meta)).map(Value::Array),
            Value::Object(_) if meta.is_empty() => None,
            Value::Object(map) => self.walk_object(map, meta).map(Value::Object),
            _ => None,
        }
    }

    pub(crate) fn walk_mut(&self, value: &mut Value, meta: &TypeMetadata) -> bool {
        if value.is_falsy() {
            return false;
        }
        match value {
            Value::Array(items) => items
                .iter_mut()
                .fold(false, |changed, item| self.walk_mut(item, meta) | changed),
            Value::Object(_) if meta.is_empty() => false,
            Value::Object(map) => self.walk_object_mut(map, meta),
            _ => false,
        }
    }

    /// Only fields declared in `meta` are visited.
    ///
    /// The copy is a deep `Map::clone`, taken at the first changed field.
    /// A change N levels down therefore clones each of the N ancestor maps
    /// in full; prefer `walk_mut` for owned data with deep chains.
    fn walk_object(&self, map: &Map, meta: &TypeMetadata) -> Option<Map> {
        let mut copy: Option<Map> = None;
        for (name, field) in meta.fields() {
            let key = Key::from(name);
            let Some(current) = map.get(&key) else {
                continue;
            };
            if let Some(converted) = self.convert_field(current, field) {
                copy.get_or_insert_with(|| map.clone()).insert(key, converted);
            }
        }
        copy
    }

    fn walk_object_mut(&self, map: &mut Map, meta: &TypeMetadata) -> bool {
        let mut changed = false;
        for (name, field) in meta.fields() {
            if let Some(current) = map.get_mut(&Key::from(name)) {
                changed |= self.convert_field_mut(current, field);
            }
        }
        changed
    }
}

/// Element-wise conversion with array-level copy-on-write
pub(crate) fn map_array(
    items: &[Value],
    mut convert: impl FnMut(&Value) -> Option<Value>,
) -> Option<Vec<Value>> {
    let mut copy: Option<Vec<Value>> = None;
    for (index, item) in items.iter().enumerate() {
        if let Some(converted) = convert(item) {
            copy.get_or_insert_with(|| items.to_vec())[index] = converted;
        }
    }
    copy
}
