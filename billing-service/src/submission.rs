//! Request payloads for the bill pages
//!
//! The console posts these to the backend unchanged. Field names follow the
//! backend's camelCase JSON.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{BillingError, BillingResult};
use crate::forms::{fields, FormSnapshot};
use crate::models::{ChargeCategory, FinalBillForm, FinalBillTotals, LineItem, LineItemBillTotals};

/// Admission and patient a bill belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillIdentity {
    pub admission_id: String,
    pub patient_id: String,
}

impl BillIdentity {
    /// Read both identifiers from a snapshot.
    ///
    /// # Errors
    ///
    /// [`BillingError::MissingField`] when either is blank or absent,
    /// regardless of parse policy.
    pub fn from_snapshot(snapshot: &FormSnapshot) -> BillingResult<Self> {
        let required = |key: &str| {
            snapshot
                .non_blank(key)
                .map(str::to_string)
                .ok_or_else(|| BillingError::MissingField(key.to_string()))
        };
        Ok(Self {
            admission_id: required(fields::ADMISSION_ID)?,
            patient_id: required(fields::PATIENT_ID)?,
        })
    }
}

/// Body of the "create final bill" request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalBillSubmission {
    pub admission_id: String,
    pub patient_id: String,
    pub bed_charges: ChargeCategory,
    pub doctor_charges: ChargeCategory,
    pub ot_charges: ChargeCategory,
    pub misc_charges: ChargeCategory,
    pub total_gross_amount: f64,
    pub total_item_discounts: f64,
    pub subtotal: f64,
    pub additional_discount_amount: f64,
    pub final_payable_amount: f64,
}

impl FinalBillSubmission {
    pub fn new(identity: BillIdentity, form: &FinalBillForm, totals: &FinalBillTotals) -> Self {
        Self {
            admission_id: identity.admission_id,
            patient_id: identity.patient_id,
            bed_charges: form.charges.bed,
            doctor_charges: form.charges.doctor,
            ot_charges: form.charges.operating_theatre,
            misc_charges: form.charges.miscellaneous,
            total_gross_amount: totals.total_gross_amount,
            total_item_discounts: totals.total_item_discounts,
            subtotal: totals.subtotal,
            additional_discount_amount: form.additional_discount_amount,
            final_payable_amount: totals.final_payable_amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedLineItem {
    pub category: String,
    pub description: String,
    pub quantity: f64,
    pub unit_rate: f64,
    pub discount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub line_total: f64,
}

/// Body of the itemized "create bill" request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillSubmission {
    pub admission_id: String,
    pub patient_id: String,
    pub items: Vec<SubmittedLineItem>,
    pub grand_total: f64,
}

impl CreateBillSubmission {
    pub fn new(identity: BillIdentity, items: &[LineItem], totals: &LineItemBillTotals) -> Self {
        let items = items
            .iter()
            .zip(&totals.line_totals)
            .map(|(item, line_total)| SubmittedLineItem {
                category: item.category.clone(),
                description: item.description.clone(),
                quantity: item.quantity,
                unit_rate: item.unit_rate,
                discount: item.discount,
                date: item.date,
                line_total: *line_total,
            })
            .collect();
        Self {
            admission_id: identity.admission_id,
            patient_id: identity.patient_id,
            items,
            grand_total: totals.grand_total,
        }
    }
}
