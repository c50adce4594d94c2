//! Utility bills (electricity, water, ...)

use crate::core::error::ValidationError;
use crate::core::resource::{FormMode, FormValues, NameIndex, Record, Resource, ResourceKind};
use crate::core::validation::{FormReader, filters};
use crate::report::Document;
use crate::report::format::{money, short_date};
use crate::report::stats::statistical_report;
use crate::report::tabular::Tabular;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityExpense {
    /// Expense category ("Electricity", "Water", ...)
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Resource for UtilityExpense {
    const KIND: ResourceKind = ResourceKind::UtilityExpense;

    fn blank_form() -> FormValues {
        FormValues::new()
            .with("type", "")
            .with("amount", "0")
            .with("date", Utc::now().format("%Y-%m-%d").to_string())
            .with("description", "")
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("type", self.kind.as_str())
            .with("amount", filters::number_to_input(self.amount))
            .with("date", self.date.to_rfc3339())
            .with("description", self.description.clone().unwrap_or_default())
    }

    fn from_form(form: &FormValues, _mode: FormMode) -> Result<Self, ValidationError> {
        let mut r = FormReader::new(form);
        let expense = UtilityExpense {
            kind: r.text("type"),
            amount: r.amount("amount"),
            date: r.date("date"),
            description: r.optional_text("description"),
        };
        r.finish(expense)
    }

    fn search_keys(&self, _index: &NameIndex) -> Vec<String> {
        vec![self.kind.clone()]
    }

    fn label(&self) -> String {
        self.kind.clone()
    }

    fn amount(&self, column: &str) -> Option<f64> {
        match column {
            "amount" => Some(self.amount),
            _ => None,
        }
    }
}

impl Tabular for UtilityExpense {
    fn report_title() -> &'static str {
        "Utility Expenses Report"
    }

    fn columns() -> &'static [&'static str] {
        &["Type", "Amount ($)", "Date", "Description"]
    }

    fn row(&self, _index: &NameIndex) -> Vec<String> {
        vec![
            self.kind.clone(),
            money(self.amount),
            short_date(&self.date),
            self.description.clone().unwrap_or_default(),
        ]
    }

    fn report(records: &[Record<Self>], _index: &NameIndex, generated_at: DateTime<Utc>) -> Document {
        statistical_report(records, generated_at)
    }
}
