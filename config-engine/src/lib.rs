//! Configuration management for the BedCare console
//!
//! Settings are layered, later sources winning:
//!
//! 1. Built-in defaults ([`ConsoleConfig::default`])
//! 2. An optional YAML or TOML file
//! 3. Environment variables prefixed `BEDCARE_`, with `__` separating
//!    nested keys (`BEDCARE_BILLING__PARSE_POLICY=strict`)
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::{ConfigLoader, ParsePolicy};
//!
//! let config = ConfigLoader::new().optional_file("bedcare.yaml").load()?;
//! if config.billing.parse_policy == ParsePolicy::Strict {
//!     println!("rejecting malformed amounts");
//! }
//! # Ok::<(), config_engine::ConfigError>(())
//! ```

pub mod engine;
pub mod model;
pub mod error;

pub use engine::*;
pub use model::*;
pub use error::*;
