//! Common error handling utilities for the BedCare console
//!
//! This module provides the shared error taxonomy and stable error codes used
//! by every console crate. Crate-local error enums convert into
//! [`ConsoleError`] at their boundary so the presentation layer sees one set
//! of kinds and codes.
//!
//! # Error Categories
//!
//! - **InvalidNumber**: a money or quantity field that does not parse
//! - **MissingField**: a required identifier left blank
//! - **ValidationError**: values that parse but break a form rule
//! - **ConfigError**: unreadable or out-of-range configuration
//! - **LoggingError**: subscriber installation failures
//!
//! # Example
//!
//! ```rust
//! use error_common::{ConsoleError, ErrorKind};
//!
//! let err = ConsoleError::InvalidNumber {
//!     field: "bedGross".to_string(),
//!     value: "12,5".to_string(),
//! };
//! assert_eq!(err.kind(), ErrorKind::InvalidNumber);
//! assert_eq!(err.code(), "VALIDATION_1004");
//! ```

pub mod types;
pub mod codes;

pub use types::*;
