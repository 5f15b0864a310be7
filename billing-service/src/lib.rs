//! Billing core for the hospital bed-management console
//!
//! Provides the calculations and form plumbing behind the billing pages:
//! - Final bill aggregation over bed, doctor, operating-theatre and
//!   miscellaneous charge categories
//! - Itemized bill aggregation over quantity, unit rate and discount rows
//! - Lenient or strict parsing of typed amounts
//! - Two-decimal display formatting
//! - Request payloads for the "create bill" and "create final bill" pages
//! - Payment entry and outstanding balance
//!
//! Rate computation, occupancy rules and bill finalization belong to the
//! backend. Nothing in this crate performs I/O.
//!
//! # Example
//!
//! ```rust
//! use billing_service::{BillCalculator, FormSnapshot};
//!
//! let snapshot = FormSnapshot::new()
//!     .with("bedGross", "15000")
//!     .with("bedDiscount", "1000")
//!     .with("bedNet", "14000")
//!     .with("additionalDiscountAmount", "20000");
//!
//! let totals = BillCalculator::default().calculate_final_bill(&snapshot).unwrap();
//! assert_eq!(totals.subtotal, 14000.0);
//! assert_eq!(totals.final_payable_amount, 0.0);
//! ```

pub mod service;
pub mod models;
pub mod forms;
pub mod parsing;
pub mod calculator;
pub mod display;
pub mod submission;
pub mod payment;
pub mod error;

pub use service::*;
pub use models::*;
pub use forms::*;
pub use parsing::*;
pub use calculator::*;
pub use display::*;
pub use submission::*;
pub use payment::*;
pub use error::*;
