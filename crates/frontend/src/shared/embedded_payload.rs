//! Начальные данные страницы, встроенные в `<script type="application/json">`
//!
//! The page renders contract data as JSON inside a script element; this
//! module reads it through the contracts codec so the UI receives native
//! dates and numeric enums straight away.

use contracts::shared::embedded::{read_embedded, PayloadSource};
use contracts::shared::metadata::TypeMetadata;
use contracts::shared::value::Value;
use contracts::ContractError;
use web_sys::Element;

use super::environment::browser_converter;

/// DOM element holding an embedded payload
pub struct ScriptElement(pub Element);

impl PayloadSource for ScriptElement {
    fn text(&self) -> Option<String> {
        self.0.text_content()
    }

    fn remove(&self) {
        self.0.remove();
    }
}

/// Прочитать встроенные данные по id элемента
///
/// # Arguments
/// * `element_id` - id of the script element
/// * `meta` - metadata of the contract type carried by the payload
/// * `remove_after` - detach the element once its payload was read
///
/// # Example
/// ```rust,ignore
/// let orders = read_script_payload("initial-orders", Some(&ORDER_META), true)?;
/// ```
pub fn read_script_payload(
    element_id: &str,
    meta: Option<&TypeMetadata>,
    remove_after: bool,
) -> Result<Value, ContractError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(ContractError::NoDocument)?;
    let element = document
        .get_element_by_id(element_id)
        .ok_or_else(|| ContractError::ElementNotFound(element_id.to_string()))?;

    let result = read_embedded(&ScriptElement(element), meta, &browser_converter(), remove_after);
    if let Err(err) = &result {
        log::error!("Failed to read embedded payload '{}': {}", element_id, err);
    }
    result
}
