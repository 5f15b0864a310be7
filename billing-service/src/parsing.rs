//! Numeric field parsing
//!
//! Money and quantity fields arrive as whatever the operator typed. The
//! lenient policy never blocks a bill on a bad number: blank, garbage and
//! non-finite text all count as zero. The strict policy keeps "blank means
//! zero" but reports anything else that is not a finite, non-negative number.

pub use config_engine::ParsePolicy;

use crate::error::{BillingError, BillingResult};

/// Parse a typed amount, treating anything unusable as zero.
///
/// ```rust
/// use billing_service::parse_amount;
///
/// assert_eq!(parse_amount(" 1500.50 "), 1500.5);
/// assert_eq!(parse_amount(""), 0.0);
/// assert_eq!(parse_amount("abc"), 0.0);
/// ```
pub fn parse_amount(raw: &str) -> f64 {
    parse_finite(raw).unwrap_or(0.0)
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Applies a [`ParsePolicy`] to individual form fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberParser {
    policy: ParsePolicy,
}

impl NumberParser {
    pub fn new(policy: ParsePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ParsePolicy {
        self.policy
    }

    /// Parse one field.
    ///
    /// # Errors
    ///
    /// Only under [`ParsePolicy::Strict`]: [`BillingError::InvalidNumber`] for
    /// text that is not a finite number, [`BillingError::Validation`] for a
    /// negative value.
    pub fn amount(&self, field: &str, raw: &str) -> BillingResult<f64> {
        match self.policy {
            ParsePolicy::Lenient => Ok(parse_amount(raw)),
            ParsePolicy::Strict => {
                if raw.trim().is_empty() {
                    return Ok(0.0);
                }
                let value =
                    parse_finite(raw).ok_or_else(|| BillingError::invalid_number(field, raw))?;
                if value < 0.0 {
                    return Err(BillingError::Validation(format!(
                        "{field} must not be negative"
                    )));
                }
                Ok(value)
            }
        }
    }
}
