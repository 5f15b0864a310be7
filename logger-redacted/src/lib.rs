//! Structured logging for the BedCare console with patient identifier redaction
//!
//! Log lines from the billing pages routinely mention the patient being
//! billed. Identifiers pass through [`PiiRedactor`] before they reach a
//! `tracing` field, so the subscriber installed here never sees raw values.
//!
//! # Detected Data Types
//!
//! - **Email Addresses**: john@example.com → j***@e***
//! - **Phone Numbers**: 987-654-3210 → ***-***-****
//! - **National IDs**: 1234 5678 9012 → ****-****-****
//! - **Medical Record Numbers**: MRN-004512 → MRN******
//! - **Custom Patterns**: configurable regex replacements
//!
//! # Example
//!
//! ```rust,no_run
//! use logger_redacted::{init_logging, LoggerConfig, PiiRedactor};
//!
//! init_logging(&LoggerConfig::default()).unwrap();
//! let redactor = PiiRedactor::new(LoggerConfig::default().redaction());
//! tracing::info!(patient = %redactor.redact_identifier("MRN-004512"), "final bill previewed");
//! ```

pub mod config;
pub mod redactor;

pub use config::*;
pub use redactor::*;

use error_common::ConsoleError;
use thiserror::Error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logger initialisation failures
#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("invalid log filter '{directive}': {reason}")]
    InvalidFilter { directive: String, reason: String },

    #[error("global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

impl From<LoggerError> for ConsoleError {
    fn from(err: LoggerError) -> Self {
        ConsoleError::LoggingError(err.to_string())
    }
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `config.level` when it is set and parses. An invalid
/// `RUST_LOG` is reported as a warning once the subscriber is up and the
/// configured level is used instead.
///
/// # Errors
///
/// Returns [`LoggerError::InvalidFilter`] when the configured level is not a
/// valid filter directive and [`LoggerError::AlreadyInitialized`] when a
/// subscriber is already installed.
pub fn init_logging(config: &LoggerConfig) -> Result<(), LoggerError> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, ignored) = resolve_filter(env.as_deref(), config)?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };
    installed.map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;

    if let Some(err) = ignored {
        tracing::warn!(error = %err, level = %config.level, "ignoring RUST_LOG");
    }
    Ok(())
}

/// Pick the filter from the `RUST_LOG` value, falling back to the configured
/// level. The second element carries the rejected `RUST_LOG` directive.
fn resolve_filter(
    env: Option<&str>,
    config: &LoggerConfig,
) -> Result<(EnvFilter, Option<LoggerError>), LoggerError> {
    let configured = || {
        EnvFilter::try_new(&config.level).map_err(|e| LoggerError::InvalidFilter {
            directive: config.level.clone(),
            reason: e.to_string(),
        })
    };

    match env.map(str::trim).filter(|directive| !directive.is_empty()) {
        Some(directive) => match EnvFilter::try_new(directive) {
            Ok(filter) => Ok((filter, None)),
            Err(e) => {
                let ignored = LoggerError::InvalidFilter {
                    directive: directive.to_string(),
                    reason: e.to_string(),
                };
                Ok((configured()?, Some(ignored)))
            }
        },
        None => Ok((configured()?, None)),
    }
}
