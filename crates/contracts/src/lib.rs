//! Contract objects exchanged with the remote API and their wire codec
//!
//! ```rust
//! use contracts::shared::metadata::{EnumMetadata, FieldMetadata, TypeMetadata};
//! use contracts::shared::value::Value;
//! use serde_json::json;
//!
//! let meta = TypeMetadata::new()
//!     .with_field("created", FieldMetadata::Date)
//!     .with_field("status", FieldMetadata::enumeration(EnumMetadata::from_iter([("Open", 1), ("Closed", 2)])));
//!
//! let wire = Value::from(json!({"created": "2024-03-15T14:02:26.123Z", "status": "open"}));
//! let order = contracts::deserialize(&wire, Some(&meta), false);
//! assert!(order.get("created").and_then(Value::as_date).is_some());
//! assert_eq!(order.get("status"), Some(&Value::from(1)));
//! ```

pub mod shared;

pub use shared::codec::{deserialize, serialize, ContractConverter, DateRecovery, Direction};
pub use shared::error::ContractError;
