//! The managed record types
//!
//! Each resource is a plain serde struct plus its [`Resource`] schema and
//! [`Tabular`](crate::report::tabular::Tabular) report layout. [`AnyRecord`]
//! is the closed variant used wherever input arrives untyped.

pub mod appointment;
pub mod employee;
pub mod macros;
pub mod product;
pub mod salary;
pub mod sale;
pub mod user;
pub mod utility_expense;

pub use appointment::Appointment;
pub use employee::Employee;
pub use product::Product;
pub use salary::Salary;
pub use sale::Sale;
pub use user::User;
pub use utility_expense::UtilityExpense;

use crate::core::error::ValidationError;
use crate::core::resource::{FormMode, FormValues, Resource, ResourceKind};
use serde_json::Value;

/// A validated payload of any resource kind
#[derive(Debug, Clone, PartialEq)]
pub enum AnyRecord {
    Appointment(Appointment),
    Employee(Employee),
    Product(Product),
    Salary(Salary),
    Sale(Sale),
    User(User),
    UtilityExpense(UtilityExpense),
}

impl AnyRecord {
    /// Validate untyped form input as the given kind
    pub fn from_form(
        kind: ResourceKind,
        form: &FormValues,
        mode: FormMode,
    ) -> Result<Self, ValidationError> {
        Ok(match kind {
            ResourceKind::Appointment => Self::Appointment(Appointment::from_form(form, mode)?),
            ResourceKind::Employee => Self::Employee(Employee::from_form(form, mode)?),
            ResourceKind::Product => Self::Product(Product::from_form(form, mode)?),
            ResourceKind::Salary => Self::Salary(Salary::from_form(form, mode)?),
            ResourceKind::Sale => Self::Sale(Sale::from_form(form, mode)?),
            ResourceKind::User => Self::User(User::from_form(form, mode)?),
            ResourceKind::UtilityExpense => {
                Self::UtilityExpense(UtilityExpense::from_form(form, mode)?)
            }
        })
    }

    /// Validate a JSON object as the given kind.
    ///
    /// Scalars are read the way a form would see them, so `"12"` and `12`
    /// are both accepted for a numeric field and `"abc"` is rejected.
    pub fn from_json(
        kind: ResourceKind,
        value: &Value,
        mode: FormMode,
    ) -> Result<Self, ValidationError> {
        Self::from_form(kind, &json_to_form(value)?, mode)
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Appointment(_) => ResourceKind::Appointment,
            Self::Employee(_) => ResourceKind::Employee,
            Self::Product(_) => ResourceKind::Product,
            Self::Salary(_) => ResourceKind::Salary,
            Self::Sale(_) => ResourceKind::Sale,
            Self::User(_) => ResourceKind::User,
            Self::UtilityExpense(_) => ResourceKind::UtilityExpense,
        }
    }

    /// The request body this payload would be sent as
    pub fn to_json(&self) -> Value {
        let result = match self {
            Self::Appointment(r) => serde_json::to_value(r),
            Self::Employee(r) => serde_json::to_value(r),
            Self::Product(r) => serde_json::to_value(r),
            Self::Salary(r) => serde_json::to_value(r),
            Self::Sale(r) => serde_json::to_value(r),
            Self::User(r) => serde_json::to_value(r),
            Self::UtilityExpense(r) => serde_json::to_value(r),
        };
        // Plain structs with string keys always serialize
        result.unwrap_or(Value::Null)
    }
}

/// Flatten a JSON object into raw form values
pub fn json_to_form(value: &Value) -> Result<FormValues, ValidationError> {
    let object = value
        .as_object()
        .ok_or_else(|| ValidationError::field("body", "expected a JSON object"))?;

    Ok(object
        .iter()
        .map(|(field, v)| {
            let raw = match v {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (field.clone(), raw)
        })
        .collect())
}
