use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tolerance used when checking a supplied net against gross minus discount
pub const NET_TOLERANCE: f64 = 0.005;

/// Charge bucket on the final bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeCategoryKind {
    Bed,
    Doctor,
    OperatingTheatre,
    Miscellaneous,
}

impl ChargeCategoryKind {
    /// Every category, in the order the final bill lists them
    pub const ALL: [ChargeCategoryKind; 4] = [
        ChargeCategoryKind::Bed,
        ChargeCategoryKind::Doctor,
        ChargeCategoryKind::OperatingTheatre,
        ChargeCategoryKind::Miscellaneous,
    ];

    /// Prefix of this category's form fields (`bedGross`, `otNet`, ...)
    pub fn field_prefix(self) -> &'static str {
        match self {
            Self::Bed => "bed",
            Self::Doctor => "doctor",
            Self::OperatingTheatre => "ot",
            Self::Miscellaneous => "misc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bed => "Bed charges",
            Self::Doctor => "Doctor charges",
            Self::OperatingTheatre => "Operating theatre charges",
            Self::Miscellaneous => "Miscellaneous charges",
        }
    }
}

/// Gross, discount and net of one charge category.
///
/// `net` is whatever the operator supplied. It is not re-derived, so a
/// category can carry a net that differs from `gross - discount`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeCategory {
    pub gross: f64,
    pub discount: f64,
    pub net: f64,
}

impl ChargeCategory {
    pub fn new(gross: f64, discount: f64, net: f64) -> Self {
        Self {
            gross,
            discount,
            net,
        }
    }

    pub fn derived_net(&self) -> f64 {
        self.gross - self.discount
    }

    pub fn is_consistent(&self) -> bool {
        (self.net - self.derived_net()).abs() < NET_TOLERANCE
    }

    /// Copy with `net` replaced by `gross - discount`, for pages that auto-fill net
    #[must_use]
    pub fn with_derived_net(self) -> Self {
        Self {
            net: self.derived_net(),
            ..self
        }
    }
}

/// The four category charges of a final bill
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryCharges {
    pub bed: ChargeCategory,
    pub doctor: ChargeCategory,
    pub operating_theatre: ChargeCategory,
    pub miscellaneous: ChargeCategory,
}

impl CategoryCharges {
    pub fn get(&self, kind: ChargeCategoryKind) -> &ChargeCategory {
        match kind {
            ChargeCategoryKind::Bed => &self.bed,
            ChargeCategoryKind::Doctor => &self.doctor,
            ChargeCategoryKind::OperatingTheatre => &self.operating_theatre,
            ChargeCategoryKind::Miscellaneous => &self.miscellaneous,
        }
    }

    pub fn get_mut(&mut self, kind: ChargeCategoryKind) -> &mut ChargeCategory {
        match kind {
            ChargeCategoryKind::Bed => &mut self.bed,
            ChargeCategoryKind::Doctor => &mut self.doctor,
            ChargeCategoryKind::OperatingTheatre => &mut self.operating_theatre,
            ChargeCategoryKind::Miscellaneous => &mut self.miscellaneous,
        }
    }

    /// Categories in bill order
    pub fn iter(&self) -> impl Iterator<Item = (ChargeCategoryKind, &ChargeCategory)> + '_ {
        ChargeCategoryKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }

    /// Categories whose supplied net disagrees with gross minus discount
    pub fn inconsistent(&self) -> Vec<ChargeCategoryKind> {
        self.iter()
            .filter(|(_, category)| !category.is_consistent())
            .map(|(kind, _)| kind)
            .collect()
    }
}

/// Typed contents of the "create final bill" form
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalBillForm {
    pub charges: CategoryCharges,
    pub additional_discount_amount: f64,
}

/// One row of the itemized "create bill" form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub category: String,
    pub description: String,
    pub quantity: f64,
    pub unit_rate: f64,
    pub discount: f64,
    pub date: Option<NaiveDate>,
}

impl LineItem {
    /// `quantity * unit_rate - discount`, negative when the discount is larger
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_rate - self.discount
    }
}

/// Summary figures of a final bill
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalBillTotals {
    pub total_gross_amount: f64,
    pub total_item_discounts: f64,
    pub subtotal: f64,
    pub final_payable_amount: f64,
}

/// Summary figures of an itemized bill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemBillTotals {
    /// One entry per line item, in input order
    pub line_totals: Vec<f64>,
    pub grand_total: f64,
}
