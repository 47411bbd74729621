use thiserror::Error;

/// Errors raised at the edges of the converter.
/// The conversion itself never fails; see the codec module.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid metadata document: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("Embedded payload is empty or missing")]
    MissingPayload,

    #[error("Embedded payload is not valid JSON: {0}")]
    InvalidPayload(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Document is not available")]
    NoDocument,
}
