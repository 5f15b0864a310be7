//! Bill aggregation
//!
//! Two pure reductions back the billing pages:
//!
//! - **Category mode** ("create final bill"): sums gross, discount and the
//!   supplied net of the four charge categories, then takes one additional
//!   discount off the subtotal. The payable amount is floored at zero.
//! - **Line-item mode** ("create bill"): `quantity * unit_rate - discount`
//!   per row, summed. Rows are never floored.
//!
//! Nothing here keeps state between calls. Parsing from a [`FormSnapshot`]
//! goes through a [`NumberParser`], so the only way a calculation can fail is
//! a strict [`ParsePolicy`].

use chrono::NaiveDate;

use crate::error::BillingResult;
use crate::forms::{category_field, fields, CategoryField, FormSnapshot};
use crate::models::{
    CategoryCharges, ChargeCategory, ChargeCategoryKind, FinalBillForm, FinalBillTotals,
    LineItem, LineItemBillTotals,
};
use crate::parsing::{NumberParser, ParsePolicy};

/// Aggregate a final bill.
pub fn final_bill_totals(form: &FinalBillForm) -> FinalBillTotals {
    let (total_gross_amount, total_item_discounts, subtotal) = form.charges.iter().fold(
        (0.0, 0.0, 0.0),
        |(gross, discount, net), (_, category)| {
            (
                gross + category.gross,
                discount + category.discount,
                net + category.net,
            )
        },
    );

    FinalBillTotals {
        total_gross_amount,
        total_item_discounts,
        subtotal,
        final_payable_amount: (subtotal - form.additional_discount_amount).max(0.0),
    }
}

/// Aggregate an itemized bill.
pub fn line_item_totals(items: &[LineItem]) -> LineItemBillTotals {
    let line_totals: Vec<f64> = items.iter().map(LineItem::line_total).collect();
    let grand_total: f64 = line_totals.iter().sum();
    LineItemBillTotals {
        line_totals,
        grand_total,
    }
}

/// Bill calculator bound to a parse policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BillCalculator {
    parser: NumberParser,
}

impl BillCalculator {
    pub fn new(policy: ParsePolicy) -> Self {
        Self {
            parser: NumberParser::new(policy),
        }
    }

    pub fn policy(&self) -> ParsePolicy {
        self.parser.policy()
    }

    pub fn parser(&self) -> &NumberParser {
        &self.parser
    }

    pub fn final_bill_totals(&self, form: &FinalBillForm) -> FinalBillTotals {
        final_bill_totals(form)
    }

    pub fn line_item_totals(&self, items: &[LineItem]) -> LineItemBillTotals {
        line_item_totals(items)
    }

    /// Read the final bill fields out of a snapshot.
    ///
    /// # Errors
    ///
    /// Under a strict policy, the first malformed field in bill order
    /// (categories, then the additional discount).
    pub fn parse_final_bill(&self, snapshot: &FormSnapshot) -> BillingResult<FinalBillForm> {
        let mut charges = CategoryCharges::default();
        for kind in ChargeCategoryKind::ALL {
            *charges.get_mut(kind) = self.parse_category(snapshot, kind)?;
        }

        let additional_discount_amount = self.field(snapshot, fields::ADDITIONAL_DISCOUNT_AMOUNT)?;

        Ok(FinalBillForm {
            charges,
            additional_discount_amount,
        })
    }

    fn parse_category(
        &self,
        snapshot: &FormSnapshot,
        kind: ChargeCategoryKind,
    ) -> BillingResult<ChargeCategory> {
        let read = |field: CategoryField| {
            let key = category_field(kind, field);
            self.field(snapshot, &key)
        };
        Ok(ChargeCategory {
            gross: read(CategoryField::Gross)?,
            discount: read(CategoryField::Discount)?,
            net: read(CategoryField::Net)?,
        })
    }

    /// Read one itemized row.
    ///
    /// An unparsable date is treated as no date, whatever the policy.
    ///
    /// # Errors
    ///
    /// Under a strict policy, a malformed quantity, unit rate or discount.
    pub fn parse_line_item(&self, row: &FormSnapshot) -> BillingResult<LineItem> {
        Ok(LineItem {
            category: row.get(fields::CATEGORY).trim().to_string(),
            description: row.get(fields::DESCRIPTION).trim().to_string(),
            quantity: self.field(row, fields::QUANTITY)?,
            unit_rate: self.field(row, fields::UNIT_RATE)?,
            discount: self.field(row, fields::DISCOUNT)?,
            date: row
                .non_blank(fields::DATE)
                .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()),
        })
    }

    /// Read every row, keeping input order.
    ///
    /// # Errors
    ///
    /// The first row that fails [`Self::parse_line_item`]; the field name is
    /// prefixed with the row index (`items[2].quantity`).
    pub fn parse_line_items(&self, rows: &[FormSnapshot]) -> BillingResult<Vec<LineItem>> {
        rows.iter()
            .enumerate()
            .map(|(index, row)| {
                self.parse_line_item(row)
                    .map_err(|err| err.at_row("items", index))
            })
            .collect()
    }

    /// Parse and aggregate a final bill snapshot.
    ///
    /// # Errors
    ///
    /// See [`Self::parse_final_bill`]. Never fails under the lenient policy.
    pub fn calculate_final_bill(&self, snapshot: &FormSnapshot) -> BillingResult<FinalBillTotals> {
        let form = self.parse_final_bill(snapshot)?;
        Ok(final_bill_totals(&form))
    }

    /// Parse and aggregate itemized rows.
    ///
    /// # Errors
    ///
    /// See [`Self::parse_line_items`]. Never fails under the lenient policy.
    pub fn calculate_bill(&self, rows: &[FormSnapshot]) -> BillingResult<LineItemBillTotals> {
        let items = self.parse_line_items(rows)?;
        Ok(line_item_totals(&items))
    }

    fn field(&self, snapshot: &FormSnapshot, key: &str) -> BillingResult<f64> {
        self.parser.amount(key, snapshot.get(key))
    }
}
