// Logger configuration
use serde::{Deserialize, Serialize};

use crate::redactor::RedactionConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set
    pub level: String,
    /// Emit one JSON object per event instead of human-readable lines
    pub json: bool,
    pub redaction_enabled: bool,
    pub hash_for_correlation: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            redaction_enabled: true,
            hash_for_correlation: true,
        }
    }
}

impl LoggerConfig {
    /// Redaction settings derived from this config
    pub fn redaction(&self) -> RedactionConfig {
        if !self.redaction_enabled {
            return RedactionConfig::disabled();
        }
        RedactionConfig {
            hash_for_correlation: self.hash_for_correlation,
            ..RedactionConfig::default()
        }
    }
}
