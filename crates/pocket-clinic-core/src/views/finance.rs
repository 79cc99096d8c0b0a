//! Financial summaries.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{is_suggested_category, ExpenseRecord, IncomeRecord};

/// Income, expenses and profit for one calendar month.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub total_income: f64,
    pub total_expenses: f64,
    /// `total_income - total_expenses`
    pub profit: f64,
    pub income_count: usize,
    pub expense_count: usize,
}

/// Expense total for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
    /// One of the suggested categories rather than free text
    pub suggested: bool,
}

fn in_month(date: NaiveDate, month: u32, year: i32) -> bool {
    date.month() == month && date.year() == year
}

/// Summarise the records dated in (`month`, `year`).
pub fn monthly_summary<'a, I, E>(income: I, expenses: E, month: u32, year: i32) -> MonthlySummary
where
    I: IntoIterator<Item = &'a IncomeRecord>,
    E: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut summary = MonthlySummary {
        month,
        year,
        ..Default::default()
    };

    for record in income.into_iter().filter(|r| in_month(r.date, month, year)) {
        summary.total_income += record.amount;
        summary.income_count += 1;
    }
    for record in expenses.into_iter().filter(|r| in_month(r.date, month, year)) {
        summary.total_expenses += record.amount;
        summary.expense_count += 1;
    }

    summary.profit = summary.total_income - summary.total_expenses;
    summary
}

/// Expenses dated in (`month`, `year`) grouped by category, largest first.
///
/// Categories group case-insensitively; the first spelling seen is kept.
pub fn expense_breakdown<'a, E>(expenses: E, month: u32, year: i32) -> Vec<CategoryTotal>
where
    E: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for record in expenses.into_iter().filter(|r| in_month(r.date, month, year)) {
        let category = if record.category.trim().is_empty() {
            "Other"
        } else {
            record.category.trim()
        };

        match totals
            .iter_mut()
            .find(|t| t.category.eq_ignore_ascii_case(category))
        {
            Some(total) => {
                total.total += record.amount;
                total.count += 1;
            }
            None => totals.push(CategoryTotal {
                category: category.to_string(),
                total: record.amount,
                count: 1,
                suggested: is_suggested_category(category),
            }),
        }
    }

    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn income(amount: f64, date: NaiveDate) -> IncomeRecord {
        IncomeRecord {
            id: format!("v-{}-income", amount),
            visit_id: format!("v-{}", amount),
            patient_name: "Jane Doe".into(),
            amount,
            date,
            description: "Visit fee - Jane Doe".into(),
            clinic_id: "c1".into(),
        }
    }

    fn expense(amount: f64, date: NaiveDate, category: &str) -> ExpenseRecord {
        ExpenseRecord {
            id: format!("e-{}", amount),
            amount,
            date,
            description: String::new(),
            category: category.into(),
            clinic_id: "c1".into(),
        }
    }

    #[test]
    fn test_monthly_summary() {
        let income = vec![
            income(50.0, day(2026, 10, 1)),
            income(75.0, day(2026, 10, 31)),
            income(500.0, day(2026, 9, 30)),
            income(500.0, day(2025, 10, 15)),
        ];
        let expenses = vec![
            expense(30.0, day(2026, 10, 5), "Supplies"),
            expense(1000.0, day(2026, 11, 1), "Rent"),
        ];

        let summary = monthly_summary(&income, &expenses, 10, 2026);
        assert_eq!(summary.total_income, 125.0);
        assert_eq!(summary.total_expenses, 30.0);
        assert_eq!(summary.profit, 95.0);
        assert_eq!(summary.income_count, 2);
        assert_eq!(summary.expense_count, 1);
    }

    #[test]
    fn test_empty_month_is_zero() {
        let summary = monthly_summary(&Vec::<IncomeRecord>::new(), &Vec::<ExpenseRecord>::new(), 2, 2026);
        assert_eq!(summary.profit, 0.0);
        assert_eq!(summary.month, 2);
        assert_eq!(summary.year, 2026);
    }

    #[test]
    fn test_loss_is_negative_profit() {
        let expenses = vec![expense(80.0, day(2026, 3, 2), "Utilities")];
        let summary = monthly_summary(&Vec::<IncomeRecord>::new(), &expenses, 3, 2026);
        assert_eq!(summary.profit, -80.0);
    }

    #[test]
    fn test_expense_breakdown() {
        let expenses = vec![
            expense(30.0, day(2026, 10, 5), "Supplies"),
            expense(20.0, day(2026, 10, 6), "supplies"),
            expense(900.0, day(2026, 10, 1), "Rent"),
            expense(5.0, day(2026, 10, 9), ""),
            expense(999.0, day(2026, 9, 1), "Rent"),
        ];

        let breakdown = expense_breakdown(&expenses, 10, 2026);
        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown[0].category, "Rent");
        assert_eq!(breakdown[0].total, 900.0);
        assert_eq!(breakdown[1].category, "Supplies");
        assert_eq!(breakdown[1].total, 50.0);
        assert_eq!(breakdown[1].count, 2);
        assert_eq!(breakdown[2].category, "Other");
        assert!(breakdown[1].suggested);
    }

    #[test]
    fn test_free_form_category_not_suggested() {
        let expenses = vec![
            expense(12.0, day(2026, 10, 3), "Hospitality"),
            expense(40.0, day(2026, 10, 4), "rent"),
        ];

        let breakdown = expense_breakdown(&expenses, 10, 2026);
        assert_eq!(breakdown[0].category, "rent");
        assert!(breakdown[0].suggested);
        assert_eq!(breakdown[1].category, "Hospitality");
        assert!(!breakdown[1].suggested);
    }
}
