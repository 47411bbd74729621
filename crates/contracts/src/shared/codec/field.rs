//! Field conversion: dispatch on the field descriptor
//!
//! Falsy values (null, false, 0, "") are never converted, which also means a
//! zero-valued enum or date coming from the wire stays as it is.

use super::walker::map_array;
use super::{date, enums, Pass};
use crate::shared::metadata::{DictionaryMetadata, FieldMetadata, KeyMetadata};
use crate::shared::value::{Key, Map, Value};

impl Pass {
    pub(crate) fn convert_field(&self, value: &Value, field: &FieldMetadata) -> Option<Value> {
        if value.is_falsy() {
            return None;
        }
        match (field, value) {
            (FieldMetadata::Array(element), Value::Array(items)) => {
                map_array(items, |item| self.convert_field(item, element)).map(Value::Array)
            }
            (FieldMetadata::Dictionary(dict), Value::Object(map)) => {
                self.convert_dictionary(map, dict).map(Value::Object)
            }
            // Shape mismatch is not an error
            (FieldMetadata::Array(_) | FieldMetadata::Dictionary(_), _) => None,
            (field, value) => self.convert_scalar(value, field),
        }
    }

    pub(crate) fn convert_field_mut(&self, value: &mut Value, field: &FieldMetadata) -> bool {
        if value.is_falsy() {
            return false;
        }
        match (field, value) {
            (FieldMetadata::Array(element), Value::Array(items)) => items
                .iter_mut()
                .fold(false, |changed, item| self.convert_field_mut(item, element) | changed),
            (FieldMetadata::Dictionary(dict), Value::Object(map)) => self.convert_dictionary_mut(map, dict),
            (FieldMetadata::Array(_) | FieldMetadata::Dictionary(_), _) => false,
            (FieldMetadata::Nested(meta), value) => self.walk_mut(value, meta),
            (field, value) => match self.convert_scalar(value, field) {
                Some(converted) => {
                    *value = converted;
                    true
                }
                None => false,
            },
        }
    }

    /// Date, then enum, then nested object, else pass-through
    fn convert_scalar(&self, value: &Value, field: &FieldMetadata) -> Option<Value> {
        match field {
            FieldMetadata::Date => date::convert_date(value, self.direction, self.recovery),
            FieldMetadata::Enum(meta) => enums::convert_enum(meta, value, self.direction),
            FieldMetadata::Nested(meta) => self.walk(value, meta),
            FieldMetadata::Scalar | FieldMetadata::Array(_) | FieldMetadata::Dictionary(_) => None,
        }
    }

    // ========================================================================
    // Dictionaries
    // ========================================================================

    /// Builds the converted map eagerly; hands it out only if an entry changed
    fn convert_dictionary(&self, map: &Map, dict: &DictionaryMetadata) -> Option<Map> {
        let mut changed = false;
        let converted: Map = map
            .iter()
            .map(|(key, item)| {
                let key = match self.convert_key(key, &dict.key) {
                    Some(converted) => {
                        changed = true;
                        converted
                    }
                    None => key.clone(),
                };
                let item = match self.convert_field(item, &dict.value) {
                    Some(converted) => {
                        changed = true;
                        converted
                    }
                    None => item.clone(),
                };
                (key, item)
            })
            .collect();
        changed.then_some(converted)
    }

    fn convert_dictionary_mut(&self, map: &mut Map, dict: &DictionaryMetadata) -> bool {
        if matches!(dict.key, KeyMetadata::Plain) {
            return map
                .values_mut()
                .fold(false, |changed, item| self.convert_field_mut(item, &dict.value) | changed);
        }

        let mut changed = false;
        for (key, mut item) in std::mem::take(map) {
            let key = match self.convert_key(&key, &dict.key) {
                Some(converted) => {
                    changed = true;
                    converted
                }
                None => key,
            };
            changed |= self.convert_field_mut(&mut item, &dict.value);
            map.insert(key, item);
        }
        changed
    }

    fn convert_key(&self, key: &Key, meta: &KeyMetadata) -> Option<Key> {
        if key.is_falsy() {
            return None;
        }
        match meta {
            KeyMetadata::Plain => None,
            KeyMetadata::Date => date::convert_date_key(key, self.direction, self.recovery),
            KeyMetadata::Enum(e) => enums::convert_enum_key(e, key, self.direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{DateRecovery, Direction};
    use super::*;
    use crate::shared::metadata::{EnumMetadata, TypeMetadata};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn pass(direction: Direction) -> Pass {
        Pass {
            direction,
            recovery: DateRecovery::Standard,
        }
    }

    fn priority() -> EnumMetadata {
        EnumMetadata::from_iter([("Low", 1), ("High", 2)])
    }

    #[test]
    fn test_falsy_values_are_skipped() {
        let field = FieldMetadata::enumeration(priority());
        for value in [Value::Null, Value::from(0), Value::from(""), Value::Bool(false)] {
            assert_eq!(pass(Direction::Deserialize).convert_field(&value, &field), None);
        }
    }

    #[test]
    fn test_array_of_enums() {
        let field = FieldMetadata::array_of(FieldMetadata::enumeration(priority()));
        let value = Value::from(json!(["Low", "high", 2]));
        assert_eq!(
            pass(Direction::Deserialize).convert_field(&value, &field),
            Some(Value::from(json!([1, 2, 2])))
        );
    }

    #[test]
    fn test_array_descriptor_on_scalar_passes_through() {
        let field = FieldMetadata::array_of(FieldMetadata::Date);
        let value = Value::from("2024-01-01T00:00:00.000Z");
        assert_eq!(pass(Direction::Deserialize).convert_field(&value, &field), None);

        let mut value = value;
        assert!(!pass(Direction::Deserialize).convert_field_mut(&mut value, &field));
    }

    #[test]
    fn test_dictionary_with_enum_keys_and_date_values() {
        let field = FieldMetadata::dictionary(KeyMetadata::enumeration(priority()), FieldMetadata::Date);
        let value = Value::from(json!({"Low": "2024-01-01T00:00:00.000Z", "High": null}));

        let converted = pass(Direction::Deserialize).convert_field(&value, &field).unwrap();
        let map = converted.as_object().unwrap();
        assert_eq!(
            map.get(&Key::Number(1)),
            Some(&Value::Date(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()))
        );
        assert_eq!(map.get(&Key::Number(2)), Some(&Value::Null));
    }

    #[test]
    fn test_unchanged_dictionary_is_not_replaced() {
        let field = FieldMetadata::dictionary(KeyMetadata::Plain, FieldMetadata::Date);
        let value = Value::from(json!({"a": 1, "b": null}));
        assert_eq!(pass(Direction::Deserialize).convert_field(&value, &field), None);
    }

    #[test]
    fn test_dictionary_of_nested_objects() {
        let line = TypeMetadata::new().with_field("priority", FieldMetadata::enumeration(priority()));
        let field = FieldMetadata::dictionary(KeyMetadata::Plain, FieldMetadata::nested(line));
        let mut value = Value::from(json!({"x": {"priority": "High"}, "y": {"priority": "Low, High"}}));

        assert!(pass(Direction::Deserialize).convert_field_mut(&mut value, &field));
        assert_eq!(value, Value::from(json!({"x": {"priority": 2}, "y": {"priority": 3}})));
    }

    #[test]
    fn test_dictionary_date_keys_in_place() {
        let field = FieldMetadata::dictionary(KeyMetadata::Date, FieldMetadata::Scalar);
        let mut value = Value::from(json!({"2024-01-01T00:00:00.000Z": 5}));
        assert!(pass(Direction::Deserialize).convert_field_mut(&mut value, &field));

        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(value.as_object().unwrap().get(&Key::Date(date)), Some(&Value::from(5)));

        assert!(pass(Direction::Serialize).convert_field_mut(&mut value, &field));
        assert_eq!(value, Value::from(json!({"2024-01-01T00:00:00.000Z": 5})));
    }

    #[test]
    fn test_nested_descriptor_on_string_passes_through() {
        let field = FieldMetadata::nested(TypeMetadata::new().with_field("a", FieldMetadata::Date));
        assert_eq!(pass(Direction::Deserialize).convert_field(&Value::from("x"), &field), None);
    }
}
