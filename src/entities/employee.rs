//! Station staff

use crate::core::error::ValidationError;
use crate::core::resource::{FormMode, FormValues, NameIndex, Resource, ResourceKind};
use crate::core::validation::FormReader;
use crate::report::tabular::Tabular;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub nic_number: String,
    pub address: String,
}

impl Resource for Employee {
    const KIND: ResourceKind = ResourceKind::Employee;
    const SORTABLE_COLUMNS: &'static [&'static str] = &["name"];

    fn blank_form() -> FormValues {
        FormValues::new()
            .with("name", "")
            .with("email", "")
            .with("phone", "")
            .with("nicNumber", "")
            .with("address", "")
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", self.name.as_str())
            .with("email", self.email.as_str())
            .with("phone", self.phone.as_str())
            .with("nicNumber", self.nic_number.as_str())
            .with("address", self.address.as_str())
    }

    fn from_form(form: &FormValues, _mode: FormMode) -> Result<Self, ValidationError> {
        let mut r = FormReader::new(form);
        let employee = Employee {
            name: r.text("name"),
            email: r.text("email"),
            phone: r.text("phone"),
            nic_number: r.text("nicNumber"),
            address: r.text("address"),
        };
        r.finish(employee)
    }

    fn search_keys(&self, _index: &NameIndex) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn compare_by(&self, other: &Self, column: &str) -> Option<Ordering> {
        match column {
            "name" => Some(
                self.name
                    .to_lowercase()
                    .cmp(&other.name.to_lowercase())
                    .then_with(|| self.name.cmp(&other.name)),
            ),
            _ => None,
        }
    }
}

impl Tabular for Employee {
    fn report_title() -> &'static str {
        "Employee Report"
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Email", "Phone", "NIC"]
    }

    fn row(&self, _index: &NameIndex) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.nic_number.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(name: &str) -> Employee {
        Employee {
            name: name.to_string(),
            email: format!("{}@station.lk", name.to_lowercase()),
            phone: "0771234567".to_string(),
            nic_number: "901234567V".to_string(),
            address: "12 Galle Road".to_string(),
        }
    }

    #[test]
    fn test_missing_fields_all_reported() {
        let form = Employee::blank_form().with("name", "Nimal");
        let err = Employee::from_form(&form, FormMode::Create).unwrap_err();
        assert_eq!(err.fields(), vec!["email", "phone", "nicNumber", "address"]);
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let a = employee("amal");
        let b = employee("Bandara");
        assert_eq!(a.compare_by(&b, "name"), Some(Ordering::Less));
        assert_eq!(a.compare_by(&b, "phone"), None);
    }

    #[test]
    fn test_report_row_has_no_address() {
        let row = employee("Nimal").row(&NameIndex::new());
        assert_eq!(row.len(), Employee::columns().len());
        assert_eq!(row[3], "901234567V");
    }
}
