//! Display formatting for bill totals
//!
//! Computation never rounds. Two-decimal rendering happens only here, when a
//! figure is turned into text for the page or the terminal.

use std::fmt;

use config_engine::{BillingConfig, MAX_DISPLAY_DECIMALS};
use serde::Serialize;

use crate::models::{FinalBillTotals, LineItem, LineItemBillTotals};

pub const DEFAULT_DECIMALS: usize = 2;

/// Render an amount with exactly two decimals.
///
/// ```rust
/// use billing_service::format_amount;
///
/// assert_eq!(format_amount(45000.0), "45000.00");
/// assert_eq!(format_amount(1234.5), "1234.50");
/// ```
pub fn format_amount(value: f64) -> String {
    format_fixed(value, DEFAULT_DECIMALS)
}

/// Render an amount with a fixed number of decimals; negative zero prints as zero
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    match text.strip_prefix('-') {
        Some(magnitude) if magnitude.chars().all(|c| c == '0' || c == '.') => {
            magnitude.to_string()
        }
        _ => text,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub currency_symbol: String,
    pub decimals: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self::from(&BillingConfig::default())
    }
}

/// Precision is capped at [`MAX_DISPLAY_DECIMALS`] even for configurations
/// that never went through validation.
impl From<&BillingConfig> for DisplayOptions {
    fn from(config: &BillingConfig) -> Self {
        let decimals = config.decimals.min(MAX_DISPLAY_DECIMALS);
        Self {
            currency_symbol: config.currency_symbol.clone(),
            decimals: usize::try_from(decimals).unwrap_or(DEFAULT_DECIMALS),
        }
    }
}

impl DisplayOptions {
    pub fn money(&self, value: f64) -> String {
        format!("{}{}", self.currency_symbol, format_fixed(value, self.decimals))
    }
}

/// Final bill figures as the page shows them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalBillSummary {
    pub total_gross_amount: String,
    pub total_item_discounts: String,
    pub subtotal: String,
    pub final_payable_amount: String,
}

impl FinalBillSummary {
    pub fn new(totals: &FinalBillTotals, options: &DisplayOptions) -> Self {
        Self {
            total_gross_amount: options.money(totals.total_gross_amount),
            total_item_discounts: options.money(totals.total_item_discounts),
            subtotal: options.money(totals.subtotal),
            final_payable_amount: options.money(totals.final_payable_amount),
        }
    }
}

impl fmt::Display for FinalBillSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<24}{:>16}", "Total gross amount", self.total_gross_amount)?;
        writeln!(f, "{:<24}{:>16}", "Total item discounts", self.total_item_discounts)?;
        writeln!(f, "{:<24}{:>16}", "Subtotal", self.subtotal)?;
        write!(f, "{:<24}{:>16}", "Final payable amount", self.final_payable_amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSummary {
    pub description: String,
    pub line_total: String,
}

/// Itemized bill figures as the page shows them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemBillSummary {
    pub lines: Vec<LineSummary>,
    pub grand_total: String,
}

impl LineItemBillSummary {
    pub fn new(items: &[LineItem], totals: &LineItemBillTotals, options: &DisplayOptions) -> Self {
        let lines = items
            .iter()
            .zip(&totals.line_totals)
            .map(|(item, total)| LineSummary {
                description: item.description.clone(),
                line_total: options.money(*total),
            })
            .collect();
        Self {
            lines,
            grand_total: options.money(totals.grand_total),
        }
    }
}

impl fmt::Display for LineItemBillSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, line) in self.lines.iter().enumerate() {
            let label = if line.description.is_empty() {
                format!("Item {}", index + 1)
            } else {
                line.description.clone()
            };
            writeln!(f, "{label:<32}{:>16}", line.line_total)?;
        }
        write!(f, "{:<32}{:>16}", "Grand total", self.grand_total)
    }
}
