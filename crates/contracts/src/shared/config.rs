use super::error::ContractError;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConverterConfig {
    #[serde(default)]
    pub dates: DatesConfig,
    #[serde(default)]
    pub collections: CollectionsConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatesConfig {
    #[serde(default)]
    pub recovery: RecoveryMode,
}

/// How date text the standard parser rejects is handled
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryMode {
    #[default]
    Standard,
    Legacy,
    /// Decide from the user agent of the running environment
    Detect,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CollectionsConfig {
    /// Unwrap `{ "value": [...] }` envelopes by default
    #[serde(default)]
    pub unwrap_wrapped: bool,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[dates]
recovery = "standard"

[collections]
unwrap_wrapped = false
"#;

pub fn parse_config(contents: &str) -> Result<ConverterConfig, ContractError> {
    Ok(toml::from_str(contents)?)
}

/// Load converter configuration from a TOML file
///
/// Falls back to the embedded default when the file does not exist.
pub fn load_config(path: impl AsRef<Path>) -> Result<ConverterConfig, ContractError> {
    let path = path.as_ref();
    if path.exists() {
        tracing::info!("Loading converter config from: {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        return parse_config(&contents);
    }

    tracing::warn!("converter config not found at: {}", path.display());
    tracing::info!("Using default embedded converter configuration");
    parse_config(DEFAULT_CONFIG)
}
