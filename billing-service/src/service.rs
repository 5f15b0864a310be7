use config_engine::ConsoleConfig;
use logger_redacted::{PiiRedactor, RedactionConfig};
use serde::Serialize;

use crate::calculator::BillCalculator;
use crate::display::{DisplayOptions, FinalBillSummary, LineItemBillSummary};
use crate::error::BillingResult;
use crate::forms::{fields, FormSnapshot};
use crate::models::{FinalBillForm, FinalBillTotals, LineItem, LineItemBillTotals};
use crate::parsing::ParsePolicy;
use crate::payment::{outstanding_balance, total_paid, PaymentEntry};
use crate::submission::{BillIdentity, CreateBillSubmission, FinalBillSubmission};

/// Everything the billing service needs from configuration
#[derive(Debug, Clone, Default)]
pub struct BillingSettings {
    pub policy: ParsePolicy,
    pub display: DisplayOptions,
    pub redaction: RedactionConfig,
}

impl BillingSettings {
    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self {
            policy: config.billing.parse_policy,
            display: DisplayOptions::from(&config.billing),
            redaction: config.logging.redaction(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ParsePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Parsed form, totals and display text of a final bill
#[derive(Debug, Clone, PartialEq)]
pub struct FinalBillPreview {
    pub form: FinalBillForm,
    pub totals: FinalBillTotals,
    pub summary: FinalBillSummary,
}

/// Parsed rows, totals and display text of an itemized bill
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemBillPreview {
    pub items: Vec<LineItem>,
    pub totals: LineItemBillTotals,
    pub summary: LineItemBillSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub final_payable_amount: f64,
    pub total_paid: f64,
    pub outstanding_balance: f64,
}

/// Billing service backing the bill and payment pages
#[derive(Debug, Clone, Default)]
pub struct BillingService {
    calculator: BillCalculator,
    display: DisplayOptions,
    redactor: PiiRedactor,
}

impl BillingService {
    /// Create a new billing service
    pub fn new(settings: BillingSettings) -> Self {
        Self {
            calculator: BillCalculator::new(settings.policy),
            display: settings.display,
            redactor: PiiRedactor::new(settings.redaction),
        }
    }

    pub fn calculator(&self) -> &BillCalculator {
        &self.calculator
    }

    pub fn display(&self) -> &DisplayOptions {
        &self.display
    }

    /// Recompute the final bill figures for the current form state.
    ///
    /// # Errors
    ///
    /// Strict-policy number errors only.
    pub fn preview_final_bill(&self, snapshot: &FormSnapshot) -> BillingResult<FinalBillPreview> {
        let form = self.calculator.parse_final_bill(snapshot)?;
        let totals = self.calculator.final_bill_totals(&form);

        let inconsistent = form.charges.inconsistent();
        if !inconsistent.is_empty() {
            tracing::debug!(
                admission = %self.redact_field(snapshot, fields::ADMISSION_ID),
                categories = ?inconsistent,
                "supplied net differs from gross minus discount"
            );
        }
        tracing::debug!(
            admission = %self.redact_field(snapshot, fields::ADMISSION_ID),
            subtotal = totals.subtotal,
            final_payable_amount = totals.final_payable_amount,
            "final bill recomputed"
        );

        Ok(FinalBillPreview {
            form,
            summary: FinalBillSummary::new(&totals, &self.display),
            totals,
        })
    }

    /// Recompute the itemized bill figures for the current rows.
    ///
    /// # Errors
    ///
    /// Strict-policy number errors only.
    pub fn preview_bill(&self, rows: &[FormSnapshot]) -> BillingResult<LineItemBillPreview> {
        let items = self.calculator.parse_line_items(rows)?;
        let totals = self.calculator.line_item_totals(&items);
        tracing::debug!(
            items = items.len(),
            grand_total = totals.grand_total,
            "itemized bill recomputed"
        );
        Ok(LineItemBillPreview {
            summary: LineItemBillSummary::new(&items, &totals, &self.display),
            items,
            totals,
        })
    }

    /// Build the "create final bill" request body.
    ///
    /// # Errors
    ///
    /// Missing admission or patient identifiers, and strict-policy number
    /// errors.
    pub fn final_bill_submission(&self, snapshot: &FormSnapshot) -> BillingResult<FinalBillSubmission> {
        let identity = BillIdentity::from_snapshot(snapshot)?;
        let preview = self.preview_final_bill(snapshot)?;
        tracing::info!(
            admission = %self.redactor.redact_identifier(&identity.admission_id),
            patient = %self.redactor.redact_identifier(&identity.patient_id),
            final_payable_amount = preview.totals.final_payable_amount,
            "final bill prepared for submission"
        );
        Ok(FinalBillSubmission::new(identity, &preview.form, &preview.totals))
    }

    /// Build the itemized "create bill" request body from the header fields
    /// and the item rows.
    ///
    /// # Errors
    ///
    /// Missing admission or patient identifiers, and strict-policy number
    /// errors.
    pub fn create_bill_submission(
        &self,
        header: &FormSnapshot,
        rows: &[FormSnapshot],
    ) -> BillingResult<CreateBillSubmission> {
        let identity = BillIdentity::from_snapshot(header)?;
        let preview = self.preview_bill(rows)?;
        tracing::info!(
            admission = %self.redactor.redact_identifier(&identity.admission_id),
            patient = %self.redactor.redact_identifier(&identity.patient_id),
            items = preview.items.len(),
            grand_total = preview.totals.grand_total,
            "itemized bill prepared for submission"
        );
        Ok(CreateBillSubmission::new(identity, &preview.items, &preview.totals))
    }

    /// Apply payment rows against a final payable amount.
    ///
    /// # Errors
    ///
    /// The first payment row with a missing or unknown method, and
    /// strict-policy amount errors, qualified as `payments[N].field`.
    pub fn record_payments(
        &self,
        final_payable_amount: f64,
        rows: &[FormSnapshot],
    ) -> BillingResult<PaymentSummary> {
        let payments = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                PaymentEntry::from_snapshot(row, self.calculator.parser())
                    .map_err(|err| err.at_row("payments", index))
            })
            .collect::<BillingResult<Vec<_>>>()?;

        let summary = PaymentSummary {
            final_payable_amount,
            total_paid: total_paid(&payments),
            outstanding_balance: outstanding_balance(final_payable_amount, &payments),
        };
        tracing::info!(
            payments = payments.len(),
            total_paid = summary.total_paid,
            outstanding_balance = summary.outstanding_balance,
            "payments applied"
        );
        Ok(summary)
    }

    fn redact_field(&self, snapshot: &FormSnapshot, key: &str) -> String {
        self.redactor.redact_identifier(snapshot.get(key))
    }
}
