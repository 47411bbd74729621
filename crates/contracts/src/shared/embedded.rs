//! Contract payloads embedded in a host document
//!
//! A page can ship initial data as JSON inside a script element. The
//! document side only has to expose the element text and a way to remove
//! it; parsing and conversion happen here.

use super::codec::ContractConverter;
use super::error::ContractError;
use super::metadata::TypeMetadata;
use super::value::Value;

/// Host-document element carrying a JSON payload
pub trait PayloadSource {
    /// Raw text content, if any
    fn text(&self) -> Option<String>;

    /// Detach the element from its document
    fn remove(&self);
}

/// Read, parse and deserialize an embedded payload.
///
/// The source is only removed after the payload was read successfully.
pub fn read_embedded(
    source: &impl PayloadSource,
    meta: Option<&TypeMetadata>,
    converter: &ContractConverter,
    remove_after: bool,
) -> Result<Value, ContractError> {
    let text = source
        .text()
        .filter(|text| !text.trim().is_empty())
        .ok_or(ContractError::MissingPayload)?;
    let json: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| ContractError::InvalidPayload(e.to_string()))?;

    // The parsed tree is exclusively owned here
    let mut value = Value::from(json);
    converter.deserialize_in_place(&mut value, meta, converter.unwraps_collections());

    if remove_after {
        source.remove();
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::parse_config;
    use crate::shared::metadata::FieldMetadata;
    use std::cell::Cell;

    struct FakeScript {
        text: Option<&'static str>,
        removed: Cell<bool>,
    }

    impl FakeScript {
        fn new(text: Option<&'static str>) -> Self {
            Self {
                text,
                removed: Cell::new(false),
            }
        }
    }

    impl PayloadSource for FakeScript {
        fn text(&self) -> Option<String> {
            self.text.map(str::to_string)
        }

        fn remove(&self) {
            self.removed.set(true);
        }
    }

    fn meta() -> TypeMetadata {
        TypeMetadata::new().with_field("at", FieldMetadata::Date)
    }

    #[test]
    fn test_reads_and_converts_payload() {
        let script = FakeScript::new(Some(r#"{"at": "2024-05-01T08:30:00.000Z", "n": 1}"#));
        let value = read_embedded(&script, Some(&meta()), &ContractConverter::default(), true).unwrap();

        assert!(matches!(value.get("at"), Some(Value::Date(_))));
        assert_eq!(value.get("n"), Some(&Value::from(1)));
        assert!(script.removed.get());
    }

    #[test]
    fn test_keeps_source_when_asked() {
        let script = FakeScript::new(Some("[]"));
        read_embedded(&script, Some(&meta()), &ContractConverter::default(), false).unwrap();
        assert!(!script.removed.get());
    }

    #[test]
    fn test_configured_unwrap_applies() {
        let config = parse_config("[collections]\nunwrap_wrapped = true\n").unwrap();
        let converter = ContractConverter::from_config(&config, None);
        let script = FakeScript::new(Some(r#"{"value": [{"at": "2024-05-01T08:30:00.000Z"}], "count": 1}"#));

        let value = read_embedded(&script, Some(&meta()), &converter, false).unwrap();
        assert!(matches!(value.as_array().unwrap()[0].get("at"), Some(Value::Date(_))));
    }

    #[test]
    fn test_empty_and_invalid_payloads() {
        let converter = ContractConverter::default();
        let empty = FakeScript::new(Some("   "));
        assert!(matches!(
            read_embedded(&empty, None, &converter, true),
            Err(ContractError::MissingPayload)
        ));
        assert!(!empty.removed.get());

        let broken = FakeScript::new(Some("{not json"));
        assert!(matches!(
            read_embedded(&broken, None, &converter, true),
            Err(ContractError::InvalidPayload(_))
        ));
    }
}
