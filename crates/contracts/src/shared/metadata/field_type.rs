//! Field-level conversion descriptors

use super::types::{EnumMetadata, TypeMetadata};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Conversion kind of a single field.
/// Decided once when metadata is authored; exactly one kind per field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum FieldMetadata {
    /// Passed through unchanged
    #[default]
    Scalar,
    Date,
    Enum(Arc<EnumMetadata>),
    /// Nested contract object, walked recursively
    Nested(Arc<TypeMetadata>),
    /// Sequence; each element converted with the element descriptor
    Array(Box<FieldMetadata>),
    Dictionary(DictionaryMetadata),
}

/// Independent key and value conversion for associative maps
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DictionaryMetadata {
    #[serde(default)]
    pub key: KeyMetadata,
    #[serde(default)]
    pub value: Box<FieldMetadata>,
}

/// Conversion applied to dictionary keys
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum KeyMetadata {
    #[default]
    Plain,
    Date,
    Enum(Arc<EnumMetadata>),
}

impl FieldMetadata {
    pub fn enumeration(meta: impl Into<Arc<EnumMetadata>>) -> Self {
        Self::Enum(meta.into())
    }

    pub fn nested(meta: impl Into<Arc<TypeMetadata>>) -> Self {
        Self::Nested(meta.into())
    }

    pub fn array_of(element: FieldMetadata) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn dictionary(key: KeyMetadata, value: FieldMetadata) -> Self {
        Self::Dictionary(DictionaryMetadata {
            key,
            value: Box::new(value),
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Date => "date",
            Self::Enum(_) => "enum",
            Self::Nested(_) => "nested",
            Self::Array(_) => "array",
            Self::Dictionary(_) => "dictionary",
        }
    }
}

impl KeyMetadata {
    pub fn enumeration(meta: impl Into<Arc<EnumMetadata>>) -> Self {
        Self::Enum(meta.into())
    }
}
