//! Service bay appointments

use crate::core::error::ValidationError;
use crate::core::resource::{FormMode, FormValues, NameIndex, Resource, ResourceKind};
use crate::core::validation::{FormReader, filters};
use crate::report::format::money;
use crate::report::tabular::Tabular;
use serde::{Deserialize, Serialize};

/// A booked service slot. Date and time are kept as booked, unparsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub car_number: String,
    pub car_type: String,
    pub vehicle_type: String,
    pub payment_method: String,
    pub date: String,
    pub time: String,
    pub slot_number: u32,
    pub service_type: String,
    pub status: String,
    pub price: f64,
}

impl Resource for Appointment {
    const KIND: ResourceKind = ResourceKind::Appointment;

    fn blank_form() -> FormValues {
        FormValues::new()
            .with("carNumber", "")
            .with("carType", "")
            .with("vehicleType", "")
            .with("paymentMethod", "")
            .with("date", "")
            .with("time", "")
            .with("slotNumber", "")
            .with("serviceType", "")
            .with("status", "Pending")
            .with("price", "0")
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("carNumber", self.car_number.as_str())
            .with("carType", self.car_type.as_str())
            .with("vehicleType", self.vehicle_type.as_str())
            .with("paymentMethod", self.payment_method.as_str())
            .with("date", self.date.as_str())
            .with("time", self.time.as_str())
            .with("slotNumber", self.slot_number.to_string())
            .with("serviceType", self.service_type.as_str())
            .with("status", self.status.as_str())
            .with("price", filters::number_to_input(self.price))
    }

    fn from_form(form: &FormValues, _mode: FormMode) -> Result<Self, ValidationError> {
        let mut r = FormReader::new(form);
        let appointment = Appointment {
            car_number: r.text("carNumber"),
            car_type: r.text("carType"),
            vehicle_type: r.text("vehicleType"),
            payment_method: r.text("paymentMethod"),
            date: r.text("date"),
            time: r.text("time"),
            slot_number: r.count("slotNumber"),
            service_type: r.text("serviceType"),
            status: r.text("status"),
            price: r.amount("price"),
        };
        r.finish(appointment)
    }

    fn search_keys(&self, _index: &NameIndex) -> Vec<String> {
        vec![self.car_number.clone()]
    }

    fn label(&self) -> String {
        self.car_number.clone()
    }

    fn amount(&self, column: &str) -> Option<f64> {
        match column {
            "price" => Some(self.price),
            _ => None,
        }
    }
}

impl Tabular for Appointment {
    fn report_title() -> &'static str {
        "Appointments Report"
    }

    fn columns() -> &'static [&'static str] {
        &[
            "Car Number",
            "Car Type",
            "Vehicle Type",
            "Payment Method",
            "Date",
            "Time",
            "Slot Number",
            "Service Type",
            "Status",
            "Price",
        ]
    }

    fn row(&self, _index: &NameIndex) -> Vec<String> {
        vec![
            self.car_number.clone(),
            self.car_type.clone(),
            self.vehicle_type.clone(),
            self.payment_method.clone(),
            self.date.clone(),
            self.time.clone(),
            self.slot_number.to_string(),
            self.service_type.clone(),
            self.status.clone(),
            money(self.price),
        ]
    }
}
