use logger_redacted::LoggerConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Upper bound on display precision; amounts are rupees and paise
pub const MAX_DISPLAY_DECIMALS: u32 = 6;

/// How numeric form fields that fail to parse are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Unparsable text silently counts as zero
    #[default]
    Lenient,
    /// Unparsable text and negative amounts are rejected
    Strict,
}

/// Billing page settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    pub parse_policy: ParsePolicy,
    pub currency_symbol: String,
    pub decimals: u32,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            parse_policy: ParsePolicy::Lenient,
            currency_symbol: "₹".to_string(),
            decimals: 2,
        }
    }
}

/// Root configuration for the console tooling
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub billing: BillingConfig,
    pub logging: LoggerConfig,
}

impl ConsoleConfig {
    /// Check values that deserialize fine but make no sense.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if self.billing.decimals > MAX_DISPLAY_DECIMALS {
            return Err(ConfigError::ValidationError(format!(
                "billing.decimals must be at most {MAX_DISPLAY_DECIMALS}, got {}",
                self.billing.decimals
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
