//! Type-level and enum metadata
//!
//! Both are supplied by the caller and never mutated by the converter.

use super::field_type::FieldMetadata;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Type-level metadata
// ============================================================================

/// Describes one contract type: field name -> conversion behaviour.
/// Fields missing from the map are never touched by the converter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeMetadata {
    fields: BTreeMap<String, FieldMetadata>,
}

impl TypeMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field declaration
    pub fn with_field(mut self, name: impl Into<String>, field: FieldMetadata) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, field: FieldMetadata) {
        self.fields.insert(name.into(), field);
    }

    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldMetadata)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    /// True when no field is declared (objects are then returned as is)
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse a metadata document in the tagged JSON form
    pub fn from_json_str(json: &str) -> Result<Self, crate::shared::error::ContractError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<N: Into<String>> FromIterator<(N, FieldMetadata)> for TypeMetadata {
    fn from_iter<I: IntoIterator<Item = (N, FieldMetadata)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(n, f)| (n.into(), f)).collect(),
        }
    }
}

// ============================================================================
// Enum metadata
// ============================================================================

/// Enumeration member name -> integer value, in authored order.
/// Doubles as a flag set: several names may be OR-ed together.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnumMetadata {
    members: IndexMap<String, i64>,
}

impl EnumMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member(mut self, name: impl Into<String>, value: i64) -> Self {
        self.members.insert(name.into(), value);
        self
    }

    /// Exact name lookup
    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.members.get(name).copied()
    }

    /// Case-insensitive scan in authored order, first match wins
    pub fn value_of_ignore_case(&self, name: &str) -> Option<i64> {
        let wanted = name.to_lowercase();
        self.members
            .iter()
            .find(|(member, _)| member.to_lowercase() == wanted)
            .map(|(_, value)| *value)
    }

    /// Exact lookup with case-insensitive fallback
    pub fn resolve(&self, name: &str) -> Option<i64> {
        self.value_of(name)
            .or_else(|| self.value_of_ignore_case(name))
    }

    pub fn members(&self) -> impl Iterator<Item = (&str, i64)> {
        self.members.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl<N: Into<String>> FromIterator<(N, i64)> for EnumMetadata {
    fn from_iter<I: IntoIterator<Item = (N, i64)>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> EnumMetadata {
        EnumMetadata::from_iter([("Red", 1), ("Green", 2), ("Blue", 4)])
    }

    #[test]
    fn test_exact_lookup() {
        assert_eq!(colors().value_of("Green"), Some(2));
        assert_eq!(colors().value_of("green"), None);
    }

    #[test]
    fn test_case_insensitive_fallback() {
        assert_eq!(colors().resolve("BLUE"), Some(4));
        assert_eq!(colors().resolve("Purple"), None);
    }

    #[test]
    fn test_case_insensitive_scan_follows_authored_order() {
        let lower_first = EnumMetadata::new().with_member("read", 1).with_member("Read", 8);
        assert_eq!(lower_first.resolve("READ"), Some(1));
        assert_eq!(lower_first.resolve("Read"), Some(8));

        let upper_first: EnumMetadata = serde_json::from_str(r#"{"Read": 8, "read": 1}"#).unwrap();
        assert_eq!(upper_first.resolve("READ"), Some(8));
        assert_eq!(
            upper_first.members().collect::<Vec<_>>(),
            vec![("Read", 8), ("read", 1)]
        );
    }

    #[test]
    fn test_insert_replaces_field() {
        let mut meta = TypeMetadata::new().with_field("at", FieldMetadata::Scalar);
        meta.insert("at", FieldMetadata::Date);
        meta.insert("due", FieldMetadata::Date);

        assert_eq!(meta.field("at"), Some(&FieldMetadata::Date));
        assert_eq!(meta.fields().map(|(name, _)| name).collect::<Vec<_>>(), vec!["at", "due"]);
    }

    #[test]
    fn test_tagged_json_document() {
        let meta = TypeMetadata::from_json_str(
            r#"{
                "created": {"kind": "date"},
                "color": {"kind": "enum", "of": {"Red": 1, "Green": 2}},
                "tags": {"kind": "array", "of": {"kind": "scalar"}}
            }"#,
        )
        .unwrap();

        assert_eq!(meta.field("created"), Some(&FieldMetadata::Date));
        assert!(matches!(meta.field("color"), Some(FieldMetadata::Enum(e)) if e.value_of("Red") == Some(1)));
        assert!(matches!(meta.field("tags"), Some(FieldMetadata::Array(_))));
        assert!(meta.field("missing").is_none());
    }
}
