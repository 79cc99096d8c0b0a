//! Income and expense models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Visit;

/// Suffix appended to a visit id to form its income record id.
pub const INCOME_ID_SUFFIX: &str = "-income";

/// Expense categories offered by the entry form. Not enforced.
pub const SUGGESTED_EXPENSE_CATEGORIES: [&str; 7] = [
    "Rent",
    "Salaries",
    "Supplies",
    "Equipment",
    "Utilities",
    "Maintenance",
    "Other",
];

/// Income derived from a visit fee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRecord {
    pub id: String,
    pub visit_id: String,
    pub patient_name: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub clinic_id: String,
}

impl IncomeRecord {
    /// Build the income record that accompanies a newly logged visit.
    pub fn from_visit(visit: &Visit) -> Self {
        Self {
            id: format!("{}{}", visit.id, INCOME_ID_SUFFIX),
            visit_id: visit.id.clone(),
            patient_name: visit.patient_name.clone(),
            amount: visit.fee,
            date: visit.visit_day(),
            description: format!("Visit fee - {}", visit.patient_name),
            clinic_id: visit.clinic_id.clone(),
        }
    }
}

/// A clinic expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub clinic_id: String,
}

/// Fields supplied when recording an expense.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
}

/// Partial update for an expense. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl ExpenseRecord {
    /// Create a new expense belonging to `clinic_id`.
    pub fn new(clinic_id: &str, fields: NewExpense) -> Self {
        Self {
            id: super::new_id(),
            amount: fields.amount,
            date: fields.date,
            description: fields.description,
            category: fields.category,
            clinic_id: clinic_id.to_string(),
        }
    }

    /// Merge a partial update into this expense.
    pub fn apply(&mut self, patch: ExpensePatch) {
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
    }
}

/// Whether `category` is one of the suggested ones, ignoring case.
pub fn is_suggested_category(category: &str) -> bool {
    SUGGESTED_EXPENSE_CATEGORIES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(category.trim()))
}
