//! Monthly salary slips

use crate::core::error::ValidationError;
use crate::core::resource::{FormMode, FormValues, NameIndex, Resource, ResourceKind};
use crate::core::validation::{FormReader, filters};
use crate::report::format::{money, short_date};
use crate::report::tabular::Tabular;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A salary slip. `total_pay` is fixed at save time as `base_pay + bonus`
/// and is not recomputed when read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    pub name: String,
    pub base_pay: f64,
    pub bonus: f64,
    pub total_pay: f64,
    pub work_days: u32,
    pub date: DateTime<Utc>,
    pub phone: String,
}

impl Resource for Salary {
    const KIND: ResourceKind = ResourceKind::Salary;

    fn blank_form() -> FormValues {
        FormValues::new()
            .with("name", "")
            .with("basePay", "")
            .with("bonus", "0")
            .with("workDays", "")
            .with("date", "")
            .with("phone", "")
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", self.name.as_str())
            .with("basePay", filters::number_to_input(self.base_pay))
            .with("bonus", filters::number_to_input(self.bonus))
            .with("workDays", self.work_days.to_string())
            .with("date", self.date.to_rfc3339())
            .with("phone", self.phone.as_str())
    }

    fn from_form(form: &FormValues, _mode: FormMode) -> Result<Self, ValidationError> {
        let mut r = FormReader::new(form);
        let base_pay = r.amount("basePay");
        let bonus = r.amount("bonus");
        let salary = Salary {
            name: r.text("name"),
            base_pay,
            bonus,
            total_pay: base_pay + bonus,
            work_days: r.count("workDays"),
            date: r.date("date"),
            phone: r.text("phone"),
        };
        r.finish(salary)
    }

    fn search_keys(&self, _index: &NameIndex) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn amount(&self, column: &str) -> Option<f64> {
        match column {
            "basePay" => Some(self.base_pay),
            "bonus" => Some(self.bonus),
            "totalPay" => Some(self.total_pay),
            _ => None,
        }
    }
}

impl Tabular for Salary {
    fn report_title() -> &'static str {
        "Salary Report"
    }

    fn columns() -> &'static [&'static str] {
        &[
            "Name",
            "Base Pay",
            "Bonus",
            "Total Pay",
            "Work Days",
            "Date",
            "Phone",
        ]
    }

    fn row(&self, _index: &NameIndex) -> Vec<String> {
        vec![
            self.name.clone(),
            money(self.base_pay),
            money(self.bonus),
            money(self.total_pay),
            self.work_days.to_string(),
            short_date(&self.date),
            self.phone.clone(),
        ]
    }
}
