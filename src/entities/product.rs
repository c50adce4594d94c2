//! Shop inventory

use crate::core::error::ValidationError;
use crate::core::resource::{FormMode, FormValues, NameIndex, Resource, ResourceKind};
use crate::core::validation::{FormReader, filters};
use crate::report::format::{money, short_date};
use crate::report::tabular::Tabular;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub price_per_unit: f64,
    pub last_restock_date: DateTime<Utc>,
}

impl Resource for Product {
    const KIND: ResourceKind = ResourceKind::Product;

    fn blank_form() -> FormValues {
        FormValues::new()
            .with("name", "")
            .with("category", "")
            .with("quantity", "")
            .with("pricePerUnit", "")
            .with("lastRestockDate", "")
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("name", self.name.as_str())
            .with("category", self.category.as_str())
            .with("quantity", self.quantity.to_string())
            .with("pricePerUnit", filters::number_to_input(self.price_per_unit))
            .with("lastRestockDate", self.last_restock_date.to_rfc3339())
    }

    fn from_form(form: &FormValues, _mode: FormMode) -> Result<Self, ValidationError> {
        let mut r = FormReader::new(form);
        let product = Product {
            name: r.text("name"),
            category: r.text("category"),
            quantity: r.count("quantity"),
            price_per_unit: r.amount("pricePerUnit"),
            last_restock_date: r.date("lastRestockDate"),
        };
        r.finish(product)
    }

    fn search_keys(&self, _index: &NameIndex) -> Vec<String> {
        vec![self.name.clone()]
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn amount(&self, column: &str) -> Option<f64> {
        match column {
            "quantity" => Some(f64::from(self.quantity)),
            "pricePerUnit" => Some(self.price_per_unit),
            _ => None,
        }
    }
}

impl Tabular for Product {
    fn report_title() -> &'static str {
        "Product Report"
    }

    fn columns() -> &'static [&'static str] {
        &[
            "Name",
            "Category",
            "Quantity",
            "Price Per Unit",
            "Last Restock Date",
        ]
    }

    fn row(&self, _index: &NameIndex) -> Vec<String> {
        vec![
            self.name.clone(),
            self.category.clone(),
            self.quantity.to_string(),
            money(self.price_per_unit),
            short_date(&self.last_restock_date),
        ]
    }
}
