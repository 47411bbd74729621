//! Metadata types describing how contract fields are converted
//!
//! Metadata is passive data supplied by the caller. It is authored either
//! directly in Rust, from a tagged JSON document, or from the flag-style
//! documents produced by older contract generators.
//!
//! ## Usage
//!
//! ```rust
//! use contracts::shared::metadata::{EnumMetadata, FieldMetadata, TypeMetadata};
//!
//! let status = EnumMetadata::from_iter([("Draft", 1), ("Posted", 2)]);
//! let order = TypeMetadata::new()
//!     .with_field("created_at", FieldMetadata::Date)
//!     .with_field("status", FieldMetadata::enumeration(status));
//!
//! for (name, field) in order.fields() {
//!     println!("{}: {}", name, field.as_str());
//! }
//! ```

mod field_type;
mod flags;
mod types;

pub use field_type::{DictionaryMetadata, FieldMetadata, KeyMetadata};
pub use flags::{FieldFlags, KeyFlags, TypeFlags, ValueFlags};
pub use types::{EnumMetadata, TypeMetadata};
