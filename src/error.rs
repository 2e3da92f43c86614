use thiserror::Error;

/// Main error type for anfgate operations
#[derive(Debug, Error)]
pub enum AnfGateError {
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Control-plane rejection, synchronous or observed at LRO completion.
    /// Status and message are carried through from Azure unmodified.
    #[error("Azure API error: HTTP {status}: {message}")]
    AzureApiError { status: u16, message: String },

    /// Non-success response seen by the gateway's own thin client.
    #[error("API error: HTTP {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Configuration loading error: {0}")]
    ConfigLoadError(#[from] config::ConfigError),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AnfGateError {
    pub fn authentication<S: Into<String>>(msg: S) -> Self {
        Self::AuthenticationError(msg.into())
    }

    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn azure_api<S: Into<String>>(status: u16, message: S) -> Self {
        Self::AzureApiError {
            status,
            message: message.into(),
        }
    }

    pub fn api<S: Into<String>>(status: u16, body: S) -> Self {
        Self::ApiError {
            status,
            body: body.into(),
        }
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::NetworkError(msg.into())
    }

    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Self::SerializationError(msg.into())
    }

    pub fn unknown<S: Into<String>>(msg: S) -> Self {
        Self::Unknown(msg.into())
    }
}

/// Result type alias for anfgate operations
pub type Result<T> = std::result::Result<T, AnfGateError>;

/// Convert Azure Core errors to AnfGateError
impl From<azure_core::Error> for AnfGateError {
    fn from(error: azure_core::Error) -> Self {
        Self::AuthenticationError(error.to_string())
    }
}
