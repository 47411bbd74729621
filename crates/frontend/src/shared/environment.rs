//! Browser environment probing
//!
//! Old Internet Explorer builds cannot parse ISO timestamps, so the
//! converter used in the browser picks its date recovery mode from the
//! user agent.

use contracts::{ContractConverter, DateRecovery};

/// Get the user agent of the current window
///
/// # Returns
/// - `None` if window is not available or the browser refuses to report it
pub fn user_agent() -> Option<String> {
    let window = web_sys::window()?;
    window.navigator().user_agent().ok()
}

/// Converter configured for the running browser
pub fn browser_converter() -> ContractConverter {
    let recovery = user_agent()
        .map(|ua| DateRecovery::detect(&ua))
        .unwrap_or_default();
    if recovery == DateRecovery::Legacy {
        log::debug!("legacy browser detected, enabling date recovery");
    }
    ContractConverter::new(recovery)
}
