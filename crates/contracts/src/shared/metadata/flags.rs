//! Flag-style metadata documents
//!
//! Metadata shipped by older contract generators describes fields with
//! independent flags (`isArray`, `isDate`, `enumType`, ...). Nothing in that
//! shape stops several flags being set at once, so resolution into
//! [`FieldMetadata`] checks them in a fixed order and the first match wins:
//! array, dictionary, date, enum, nested type, pass-through.

use super::field_type::{FieldMetadata, KeyMetadata};
use super::types::{EnumMetadata, TypeMetadata};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name -> flags, for one contract type
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeFlags {
    pub fields: BTreeMap<String, FieldFlags>,
}

/// Flags describing one field
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldFlags {
    pub is_array: bool,
    pub is_date: bool,
    pub enum_type: Option<EnumMetadata>,
    pub nested_type: Option<TypeFlags>,
    pub is_dictionary: bool,
    pub dictionary_key: Option<KeyFlags>,
    pub dictionary_value: Option<ValueFlags>,
}

/// Key conversion of a dictionary field
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyFlags {
    pub is_date: bool,
    pub enum_type: Option<EnumMetadata>,
}

/// Value conversion of a dictionary field
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValueFlags {
    pub is_date: bool,
    pub enum_type: Option<EnumMetadata>,
    pub nested_type: Option<TypeFlags>,
    /// Arbitrary field descriptor for homogeneous value collections
    pub field: Option<Box<FieldFlags>>,
}

impl TypeFlags {
    pub fn resolve(&self) -> TypeMetadata {
        self.fields
            .iter()
            .map(|(name, flags)| (name.clone(), flags.resolve()))
            .collect()
    }

    pub fn from_json_str(json: &str) -> Result<Self, crate::shared::error::ContractError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FieldFlags {
    pub fn resolve(&self) -> FieldMetadata {
        if self.is_array {
            return FieldMetadata::array_of(self.resolve_element());
        }
        if self.is_dictionary {
            let key = self
                .dictionary_key
                .as_ref()
                .map(KeyFlags::resolve)
                .unwrap_or_default();
            let value = self
                .dictionary_value
                .as_ref()
                .map(ValueFlags::resolve)
                .unwrap_or_default();
            return FieldMetadata::dictionary(key, value);
        }
        self.resolve_element()
    }

    /// Scalar (or per-element) conversion: date, enum, nested, pass-through
    fn resolve_element(&self) -> FieldMetadata {
        if self.is_date {
            FieldMetadata::Date
        } else if let Some(meta) = &self.enum_type {
            FieldMetadata::enumeration(meta.clone())
        } else if let Some(nested) = &self.nested_type {
            FieldMetadata::nested(nested.resolve())
        } else {
            FieldMetadata::Scalar
        }
    }
}

impl KeyFlags {
    pub fn resolve(&self) -> KeyMetadata {
        if self.is_date {
            KeyMetadata::Date
        } else if let Some(meta) = &self.enum_type {
            KeyMetadata::enumeration(meta.clone())
        } else {
            KeyMetadata::Plain
        }
    }
}

impl ValueFlags {
    pub fn resolve(&self) -> FieldMetadata {
        if self.is_date {
            FieldMetadata::Date
        } else if let Some(meta) = &self.enum_type {
            FieldMetadata::enumeration(meta.clone())
        } else if let Some(nested) = &self.nested_type {
            FieldMetadata::nested(nested.resolve())
        } else if let Some(field) = &self.field {
            field.resolve()
        } else {
            FieldMetadata::Scalar
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_wins_over_other_flags() {
        let flags = FieldFlags {
            is_array: true,
            is_date: true,
            is_dictionary: true,
            ..Default::default()
        };
        assert_eq!(flags.resolve(), FieldMetadata::array_of(FieldMetadata::Date));
    }

    #[test]
    fn test_date_wins_over_enum() {
        let flags = FieldFlags {
            is_date: true,
            enum_type: Some(EnumMetadata::from_iter([("A", 1)])),
            ..Default::default()
        };
        assert_eq!(flags.resolve(), FieldMetadata::Date);
    }

    #[test]
    fn test_unflagged_field_passes_through() {
        assert_eq!(FieldFlags::default().resolve(), FieldMetadata::Scalar);
    }

    #[test]
    fn test_document_resolution() {
        let flags = TypeFlags::from_json_str(
            r#"{
                "createdOn": {"isDate": true},
                "status": {"enumType": {"Open": 1, "Closed": 2}},
                "lines": {"isArray": true, "nestedType": {"due": {"isDate": true}}},
                "history": {
                    "isDictionary": true,
                    "dictionaryKey": {"isDate": true},
                    "dictionaryValue": {"field": {"isArray": true, "isDate": true}}
                }
            }"#,
        )
        .unwrap();
        let meta = flags.resolve();

        assert_eq!(meta.field("createdOn"), Some(&FieldMetadata::Date));
        assert!(matches!(meta.field("status"), Some(FieldMetadata::Enum(_))));

        let Some(FieldMetadata::Array(element)) = meta.field("lines") else {
            panic!("lines should resolve to an array");
        };
        assert!(matches!(element.as_ref(), FieldMetadata::Nested(t) if t.field("due") == Some(&FieldMetadata::Date)));

        assert_eq!(
            meta.field("history"),
            Some(&FieldMetadata::dictionary(
                KeyMetadata::Date,
                FieldMetadata::array_of(FieldMetadata::Date)
            ))
        );
    }
}
