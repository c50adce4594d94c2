//! Product sales

use crate::core::error::ValidationError;
use crate::core::resource::{FormMode, FormValues, NameIndex, RecordId, Resource, ResourceKind};
use crate::core::validation::{FormReader, filters};
use crate::report::format::{money, short_date};
use crate::report::tabular::Tabular;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shown wherever a sale points at a product we could not resolve
pub const UNKNOWN_PRODUCT: &str = "Unknown";

/// A sale of some volume of one product.
///
/// `product_id` refers to a [`Product`](super::Product); the name is
/// resolved client-side through a [`NameIndex`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub product_id: RecordId,
    pub volume: u32,
    pub total_sale_price: f64,
    pub payment_method: String,
    pub date: DateTime<Utc>,
}

impl Sale {
    /// Product name through the index, or "Unknown"
    pub fn product_name<'a>(&self, index: &'a NameIndex) -> &'a str {
        index.get(&self.product_id).unwrap_or(UNKNOWN_PRODUCT)
    }
}

impl Resource for Sale {
    const KIND: ResourceKind = ResourceKind::Sale;

    fn blank_form() -> FormValues {
        FormValues::new()
            .with("productId", "")
            .with("volume", "")
            .with("totalSalePrice", "")
            .with("paymentMethod", "")
            .with("date", "")
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("productId", self.product_id.as_str())
            .with("volume", self.volume.to_string())
            .with("totalSalePrice", filters::number_to_input(self.total_sale_price))
            .with("paymentMethod", self.payment_method.as_str())
            .with("date", self.date.to_rfc3339())
    }

    fn from_form(form: &FormValues, _mode: FormMode) -> Result<Self, ValidationError> {
        let mut r = FormReader::new(form);
        let sale = Sale {
            product_id: RecordId::new(r.text("productId")),
            volume: r.count("volume"),
            total_sale_price: r.amount("totalSalePrice"),
            payment_method: r.text("paymentMethod"),
            date: r.date("date"),
        };
        r.finish(sale)
    }

    fn search_keys(&self, index: &NameIndex) -> Vec<String> {
        index
            .get(&self.product_id)
            .map(|name| vec![name.to_string()])
            .unwrap_or_default()
    }

    fn label(&self) -> String {
        self.product_id.to_string()
    }

    fn amount(&self, column: &str) -> Option<f64> {
        match column {
            "volume" => Some(f64::from(self.volume)),
            "totalSalePrice" => Some(self.total_sale_price),
            _ => None,
        }
    }
}

impl Tabular for Sale {
    fn report_title() -> &'static str {
        "Sales Report"
    }

    fn columns() -> &'static [&'static str] {
        &[
            "Product",
            "Volume",
            "Total Sale Price",
            "Payment Method",
            "Date",
        ]
    }

    fn row(&self, index: &NameIndex) -> Vec<String> {
        vec![
            self.product_name(index).to_string(),
            self.volume.to_string(),
            money(self.total_sale_price),
            self.payment_method.clone(),
            short_date(&self.date),
        ]
    }
}
