use error_common::ConsoleError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BillingError {
    #[error("Invalid number in field '{field}': {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl BillingError {
    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Field the operator has to correct, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidNumber { field, .. } | Self::MissingField(field) => Some(field),
            Self::Validation(_) => None,
        }
    }

    /// Qualify the error with the repeated row it came from, e.g.
    /// `items[2].quantity` or `payments[0].method`
    pub fn at_row(self, collection: &str, index: usize) -> Self {
        match self {
            Self::InvalidNumber { field, value } => Self::InvalidNumber {
                field: format!("{collection}[{index}].{field}"),
                value,
            },
            Self::MissingField(field) => Self::MissingField(format!("{collection}[{index}].{field}")),
            Self::Validation(message) => Self::Validation(format!("{collection}[{index}]: {message}")),
        }
    }
}

impl From<BillingError> for ConsoleError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::InvalidNumber { field, value } => {
                ConsoleError::InvalidNumber { field, value }
            }
            BillingError::MissingField(field) => ConsoleError::MissingField(field),
            BillingError::Validation(message) => ConsoleError::ValidationError(message),
        }
    }
}

pub type BillingResult<T> = Result<T, BillingError>;
