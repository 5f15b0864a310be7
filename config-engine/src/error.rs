use error_common::{codes, ConsoleError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration source not found: {0}")]
    SourceNotFound(String),

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration parsing failed: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::SourceNotFound(_) | Self::UnsupportedFormat(_) => {
                codes::configuration::SOURCE_UNREADABLE
            }
            Self::ParseError(_) | Self::ValidationError(_) => codes::configuration::INVALID_VALUE,
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for ConsoleError {
    fn from(err: ConfigError) -> Self {
        ConsoleError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
