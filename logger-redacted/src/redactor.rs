use base64::{engine::general_purpose, Engine as _};
use regex::{Captures, Regex};
use sha2::{Digest, Sha256};

mod patterns {
    #![allow(clippy::unwrap_used)]

    use lazy_static::lazy_static;
    use regex::Regex;

    lazy_static! {
        pub static ref EMAIL_REGEX: Regex =
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap();
        pub static ref NATIONAL_ID_REGEX: Regex =
            Regex::new(r"\b\d{4}[-\s]\d{4}[-\s]\d{4}\b").unwrap();
        pub static ref PHONE_REGEX: Regex =
            Regex::new(r"(?:\+\d{1,3}[-.\s]?)?\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b").unwrap();
        pub static ref MRN_REGEX: Regex = Regex::new(r"\bMRN-?\d+\b").unwrap();
    }
}

use patterns::{EMAIL_REGEX, MRN_REGEX, NATIONAL_ID_REGEX, PHONE_REGEX};

/// PII redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_phones: bool,
    pub redact_national_ids: bool,
    pub redact_mrns: bool,
    /// Replace matches with a short hash so log lines about the same
    /// patient can still be correlated
    pub hash_for_correlation: bool,
    pub custom_patterns: Vec<(Regex, String)>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_phones: true,
            redact_national_ids: true,
            redact_mrns: true,
            hash_for_correlation: true,
            custom_patterns: Vec::new(),
        }
    }
}

impl RedactionConfig {
    /// Pass-through configuration for local debugging
    pub fn disabled() -> Self {
        Self {
            redact_emails: false,
            redact_phones: false,
            redact_national_ids: false,
            redact_mrns: false,
            hash_for_correlation: false,
            custom_patterns: Vec::new(),
        }
    }

    fn is_disabled(&self) -> bool {
        !(self.redact_emails
            || self.redact_phones
            || self.redact_national_ids
            || self.redact_mrns
            || self.hash_for_correlation)
            && self.custom_patterns.is_empty()
    }
}

/// PII redactor for log messages and patient identifiers
#[derive(Debug, Clone, Default)]
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.config.redact_emails {
            result = self.replace(&EMAIL_REGEX, &result, "EMAIL", |email| {
                let (user, domain) = email.split_once('@').unwrap_or((email, ""));
                format!("{}***@{}***", first_char(user), first_char(domain))
            });
        }

        // National IDs are twelve digits and would otherwise be eaten by the phone pattern
        if self.config.redact_national_ids {
            result = self.replace(&NATIONAL_ID_REGEX, &result, "NID", |_| {
                "****-****-****".to_string()
            });
        }

        if self.config.redact_phones {
            result = self.replace(&PHONE_REGEX, &result, "PHONE", |_| {
                "***-***-****".to_string()
            });
        }

        if self.config.redact_mrns {
            result = self.replace(&MRN_REGEX, &result, "MRN", |_| "MRN******".to_string());
        }

        for (pattern, replacement) in &self.config.custom_patterns {
            result = pattern.replace_all(&result, replacement.as_str()).to_string();
        }

        result
    }

    /// Redact a whole identifier value such as a patient or admission ID.
    ///
    /// Blank values stay blank so log lines still show that the field was empty.
    pub fn redact_identifier(&self, value: &str) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() || self.config.is_disabled() {
            return trimmed.to_string();
        }
        if self.config.hash_for_correlation {
            return format!("ID[{}]", hash_value(trimmed));
        }
        let count = trimmed.chars().count();
        let visible: String = trimmed.chars().skip(count.saturating_sub(4)).collect();
        format!("{}{}", "*".repeat(count.saturating_sub(4)), visible)
    }

    fn replace<F>(&self, regex: &Regex, text: &str, tag: &str, mask: F) -> String
    where
        F: Fn(&str) -> String,
    {
        regex
            .replace_all(text, |caps: &Captures| {
                let matched = caps.get(0).map_or("", |m| m.as_str());
                if self.config.hash_for_correlation {
                    format!("{tag}[{}]", hash_value(matched))
                } else {
                    mask(matched)
                }
            })
            .to_string()
    }
}

fn first_char(value: &str) -> String {
    value.chars().take(1).collect()
}

fn hash_value(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    // First 8 bytes keep the tag short while staying collision-resistant enough for log correlation
    general_purpose::STANDARD.encode(digest.get(..8).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masking_redactor() -> PiiRedactor {
        PiiRedactor::new(RedactionConfig {
            hash_for_correlation: false,
            ..Default::default()
        })
    }

    #[test]
    fn test_email_redaction() {
        let text = "Bill mailed to john.doe@example.com";
        let redacted = masking_redactor().redact(text);
        assert!(redacted.contains("j***@e***"));
        assert!(!redacted.contains("john.doe"));
    }

    #[test]
    fn test_phone_redaction() {
        let redacted = masking_redactor().redact("Attendant phone 987-654-3210");
        assert_eq!(redacted, "Attendant phone ***-***-****");
    }

    #[test]
    fn test_national_id_before_phone() {
        let redacted = masking_redactor().redact("ID 1234 5678 9012 on file");
        assert_eq!(redacted, "ID ****-****-**** on file");
    }

    #[test]
    fn test_mrn_redaction() {
        let redacted = masking_redactor().redact("Patient MRN-004512 admitted to ward 3");
        assert_eq!(redacted, "Patient MRN****** admitted to ward 3");
    }

    #[test]
    fn test_hash_is_stable_for_correlation() {
        let redactor = PiiRedactor::default();
        let first = redactor.redact("MRN1234");
        let second = redactor.redact("MRN1234");
        assert_eq!(first, second);
        assert!(first.starts_with("MRN["));
        assert_ne!(first, redactor.redact("MRN9999"));
    }

    #[test]
    fn test_identifier_masking_keeps_last_four() {
        assert_eq!(masking_redactor().redact_identifier("ADM-20240117"), "********0117");
        assert_eq!(masking_redactor().redact_identifier("   "), "");
    }

    #[test]
    fn test_disabled_config_passes_through() {
        let redactor = PiiRedactor::new(RedactionConfig::disabled());
        assert_eq!(redactor.redact("call 987-654-3210"), "call 987-654-3210");
        assert_eq!(redactor.redact_identifier("P-77"), "P-77");
    }

    #[test]
    fn test_custom_pattern() {
        let redactor = PiiRedactor::new(RedactionConfig {
            custom_patterns: vec![(Regex::new(r"\bBed\s+\d+").unwrap(), "Bed [N]".to_string())],
            ..RedactionConfig::disabled()
        });
        assert_eq!(redactor.redact("moved to Bed 12"), "moved to Bed [N]");
    }
}
