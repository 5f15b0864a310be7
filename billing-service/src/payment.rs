use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BillingError, BillingResult};
use crate::forms::{fields, FormSnapshot};
use crate::parsing::NumberParser;

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
    BankTransfer,
    Cheque,
    Insurance,
}

impl FromStr for PaymentMethod {
    type Err = BillingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "cash" => Ok(Self::Cash),
            "card" | "credit_card" | "debit_card" => Ok(Self::Card),
            "upi" => Ok(Self::Upi),
            "bank_transfer" | "neft" | "rtgs" => Ok(Self::BankTransfer),
            "cheque" | "check" => Ok(Self::Cheque),
            "insurance" => Ok(Self::Insurance),
            _ => Err(BillingError::Validation(format!(
                "unknown payment method: {raw:?}"
            ))),
        }
    }
}

/// One row of the payment entry form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub amount: f64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
}

impl PaymentEntry {
    /// Read a payment row; the amount follows the parser's policy.
    ///
    /// # Errors
    ///
    /// [`BillingError::MissingField`] for a blank method,
    /// [`BillingError::Validation`] for an unknown one, and strict-policy
    /// amount errors.
    pub fn from_snapshot(snapshot: &FormSnapshot, parser: &NumberParser) -> BillingResult<Self> {
        let method = snapshot
            .non_blank(fields::METHOD)
            .ok_or_else(|| BillingError::MissingField(fields::METHOD.to_string()))?
            .parse::<PaymentMethod>()?;
        Ok(Self {
            amount: parser.amount(fields::AMOUNT, snapshot.get(fields::AMOUNT))?,
            method,
            reference: snapshot.non_blank(fields::REFERENCE).map(str::to_string),
        })
    }
}

pub fn total_paid(payments: &[PaymentEntry]) -> f64 {
    payments.iter().map(|payment| payment.amount).sum()
}

/// Amount still owed on a bill, floored at zero like the payable amount itself
pub fn outstanding_balance(final_payable_amount: f64, payments: &[PaymentEntry]) -> f64 {
    (final_payable_amount - total_paid(payments)).max(0.0)
}
