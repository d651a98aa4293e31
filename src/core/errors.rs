use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("HTTP status {status}: {body}")]
    HttpStatusError { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    DecodeError(String),

    #[error("Failed to serialize payload: {0}")]
    SerializationError(String),

    #[error("Invalid parameters: {0}")]
    ValidationError(String),

    #[error("Credentials missing: {0}")]
    CredentialsMissingError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
