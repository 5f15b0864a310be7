use serde::Serialize;
use thiserror::Error;

use crate::codes;

/// Simplified error enum shared by every console crate
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// A numeric form field held text that is not a number
    #[error("Invalid number in field '{field}': {value:?}")]
    InvalidNumber { field: String, value: String },

    /// A required form field was left blank
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Logging subsystem errors
    #[error("Logging error: {0}")]
    LoggingError(String),

    /// Payload (de)serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Error kind as reported to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    InvalidNumber,
    MissingField,
    Validation,
    Configuration,
    Logging,
    Serialization,
    Internal,
}

impl ConsoleError {
    /// Stable error code from [`crate::codes`]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidNumber { .. } => codes::validation::INVALID_NUMBER,
            Self::MissingField(_) => codes::validation::MISSING_REQUIRED_FIELD,
            Self::ValidationError(_) => codes::validation::INVALID_INPUT,
            Self::ConfigError(_) => codes::configuration::INVALID_VALUE,
            Self::LoggingError(_) => codes::system::LOGGING_INIT_FAILED,
            Self::SerializationError(_) => codes::system::SERIALIZATION_FAILED,
            Self::InternalError(_) | Self::Other(_) => codes::system::INTERNAL,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidNumber { .. } => ErrorKind::InvalidNumber,
            Self::MissingField(_) => ErrorKind::MissingField,
            Self::ValidationError(_) => ErrorKind::Validation,
            Self::ConfigError(_) => ErrorKind::Configuration,
            Self::LoggingError(_) => ErrorKind::Logging,
            Self::SerializationError(_) => ErrorKind::Serialization,
            Self::InternalError(_) | Self::Other(_) => ErrorKind::Internal,
        }
    }

    /// Whether the operator can fix this by editing the form
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidNumber | ErrorKind::MissingField | ErrorKind::Validation
        )
    }
}

/// Result type alias for console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Log an error with its code and kind attached
pub fn log_error(context: &str, error: &ConsoleError) {
    tracing::error!(
        context = context,
        error_code = error.code(),
        error_kind = ?error.kind(),
        error = %error,
        "Console error occurred"
    );
}
