//! Form snapshots
//!
//! A snapshot is the state of a page's input fields at one instant: field
//! name to the text in that field. Pages hand the calculator a fresh snapshot
//! on every change and never share one between calls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::ChargeCategoryKind;

/// Field names used by the billing pages
pub mod fields {
    pub const ADMISSION_ID: &str = "admissionId";
    pub const PATIENT_ID: &str = "patientId";
    pub const ADDITIONAL_DISCOUNT_AMOUNT: &str = "additionalDiscountAmount";

    pub const CATEGORY: &str = "category";
    pub const DESCRIPTION: &str = "description";
    pub const QUANTITY: &str = "quantity";
    pub const UNIT_RATE: &str = "unitRate";
    pub const DISCOUNT: &str = "discount";
    pub const DATE: &str = "date";

    pub const AMOUNT: &str = "amount";
    pub const METHOD: &str = "method";
    pub const REFERENCE: &str = "reference";
}

/// Money field of a charge category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Gross,
    Discount,
    Net,
}

impl CategoryField {
    fn suffix(self) -> &'static str {
        match self {
            Self::Gross => "Gross",
            Self::Discount => "Discount",
            Self::Net => "Net",
        }
    }
}

/// Snapshot key of one category money field, e.g. `otDiscount`
pub fn category_field(kind: ChargeCategoryKind, field: CategoryField) -> String {
    format!("{}{}", kind.field_prefix(), field.suffix())
}

/// JSON value accepted for a field; numbers and flags are kept as their text
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl From<FieldValue> for String {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Text(text) => text,
            FieldValue::Number(number) => number.to_string(),
            FieldValue::Flag(flag) => flag.to_string(),
        }
    }
}

/// Immutable map of form field name to the text typed into it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Option<FieldValue>>")]
pub struct FormSnapshot(BTreeMap<String, String>);

impl From<BTreeMap<String, Option<FieldValue>>> for FormSnapshot {
    fn from(raw: BTreeMap<String, Option<FieldValue>>) -> Self {
        Self(
            raw.into_iter()
                .map(|(key, value)| (key, value.map(String::from).unwrap_or_default()))
                .collect(),
        )
    }
}

impl<K, V> FromIterator<(K, V)> for FormSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, returning the extended snapshot
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Text of a field; absent fields read as empty
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map_or("", String::as_str)
    }

    /// Trimmed text of a field, `None` when blank or absent
    pub fn non_blank(&self, key: &str) -> Option<&str> {
        Some(self.get(key).trim()).filter(|value| !value.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}
