//! Statistical utility-expense report

use super::format::{dollars, money, percent, short_date, timestamp};
use super::{Document, Page};
use crate::core::resource::{Record, ResourceKind};
use crate::entities::UtilityExpense;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

pub const REPORT_TITLE: &str = "Utility Expenses Detailed Report";
pub const NO_DATA: &str = "No data";

/// Amount spent on one expense type
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    /// Share of the overall total, 0..=100
    pub percentage: f64,
}

/// Aggregates over a non-empty set of expenses
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummary {
    pub count: usize,
    pub total: f64,
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
    /// In first-seen order
    pub by_category: Vec<CategoryTotal>,
}

impl ExpenseSummary {
    /// `None` when there is nothing to summarise
    pub fn compute<'a>(expenses: impl IntoIterator<Item = &'a UtilityExpense>) -> Option<Self> {
        let mut count = 0usize;
        let mut total = 0.0;
        let mut highest = f64::NEG_INFINITY;
        let mut lowest = f64::INFINITY;
        let mut categories: IndexMap<&str, f64> = IndexMap::new();

        for expense in expenses {
            count += 1;
            total += expense.amount;
            highest = highest.max(expense.amount);
            lowest = lowest.min(expense.amount);
            *categories.entry(expense.kind.as_str()).or_insert(0.0) += expense.amount;
        }

        if count == 0 {
            return None;
        }

        let by_category = categories
            .into_iter()
            .map(|(category, sum)| CategoryTotal {
                category: category.to_string(),
                total: sum,
                percentage: if total > 0.0 { sum / total * 100.0 } else { 0.0 },
            })
            .collect();

        Some(Self {
            count,
            total,
            average: total / count as f64,
            highest,
            lowest,
            by_category,
        })
    }
}

/// Four-page report: summary, detailed list, expenses over time and
/// distribution by type
pub fn statistical_report(
    records: &[Record<UtilityExpense>],
    generated_at: DateTime<Utc>,
) -> Document {
    let summary = ExpenseSummary::compute(records.iter().map(|r| &r.data));

    let mut first = Page::new()
        .heading(REPORT_TITLE)
        .text(format!("Generated on: {}", timestamp(&generated_at)))
        .heading("Summary Statistics");

    match &summary {
        Some(s) => {
            first = first
                .text(format!("Total Expenses: {}", dollars(s.total)))
                .text(format!("Average Expense: {}", dollars(s.average)))
                .text(format!("Highest Expense: {}", dollars(s.highest)))
                .text(format!("Lowest Expense: {}", dollars(s.lowest)))
                .heading("Expense Breakdown by Type");
            for c in &s.by_category {
                first = first.text(format!(
                    "{}: {} ({})",
                    c.category,
                    dollars(c.total),
                    percent(c.percentage)
                ));
            }
        }
        None => {
            first = first
                .text(format!("Total Expenses: {}", dollars(0.0)))
                .text(NO_DATA);
        }
    }

    let detailed = records
        .iter()
        .map(|r| {
            vec![
                r.data.kind.clone(),
                money(r.data.amount),
                short_date(&r.data.date),
                r.data.description.clone().unwrap_or_default(),
            ]
        })
        .collect();

    // sort_by_key is stable, so same-day expenses keep input order
    let mut chronological: Vec<&UtilityExpense> = records.iter().map(|r| &r.data).collect();
    chronological.sort_by_key(|e| e.date);
    let over_time = chronological
        .into_iter()
        .map(|e| vec![short_date(&e.date), e.kind.clone(), money(e.amount)])
        .collect();

    let distribution = summary
        .as_ref()
        .map(|s| {
            s.by_category
                .iter()
                .map(|c| vec![c.category.clone(), money(c.total), percent(c.percentage)])
                .collect()
        })
        .unwrap_or_default();

    Document::new(ResourceKind::UtilityExpense.report_file_name())
        .page(first)
        .page(
            Page::new()
                .heading("Detailed Expense List")
                .table(&["Type", "Amount ($)", "Date", "Description"], detailed),
        )
        .page(
            Page::new()
                .heading("Expenses Over Time")
                .table(&["Date", "Type", "Amount ($)"], over_time),
        )
        .page(
            Page::new()
                .heading("Expense Distribution by Type")
                .table(&["Type", "Total Amount ($)", "Percentage"], distribution),
        )
}
