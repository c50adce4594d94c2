//! Console user accounts

use crate::core::error::ValidationError;
use crate::core::resource::{FormMode, FormValues, NameIndex, Resource, ResourceKind};
use crate::core::validation::FormReader;
use crate::report::tabular::Tabular;
use serde::{Deserialize, Serialize};

pub const USER_TYPES: &[&str] = &["Admin", "User"];

/// A console account.
///
/// The password only ever travels client → server. It is never read from a
/// response and never copied back into an edit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "type")]
    pub user_type: String,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub address: String,
}

impl Resource for User {
    const KIND: ResourceKind = ResourceKind::User;
    const SECRET_FIELDS: &'static [&'static str] = &["password"];

    fn blank_form() -> FormValues {
        FormValues::new()
            .with("firstName", "")
            .with("lastName", "")
            .with("type", "User")
            .with("phone", "")
            .with("email", "")
            .with("password", "")
            .with("address", "")
    }

    fn to_form(&self) -> FormValues {
        FormValues::new()
            .with("firstName", self.first_name.as_str())
            .with("lastName", self.last_name.as_str())
            .with("type", self.user_type.as_str())
            .with("phone", self.phone.as_str())
            .with("email", self.email.as_str())
            .with("password", "")
            .with("address", self.address.as_str())
    }

    fn from_form(form: &FormValues, mode: FormMode) -> Result<Self, ValidationError> {
        let mut r = FormReader::new(form);
        let first_name = r.text("firstName");
        let last_name = r.text("lastName");
        let user_type = r.one_of("type", USER_TYPES);
        let phone = r.text("phone");
        let email = r.email("email");
        // Required for new accounts; left blank on edit it keeps the stored one.
        let password = match mode {
            FormMode::Create => Some(r.text("password")),
            FormMode::Edit => r.optional_text("password"),
        };
        let address = r.text("address");
        r.finish(User {
            first_name,
            last_name,
            user_type,
            phone,
            email,
            password,
            address,
        })
    }

    fn search_keys(&self, _index: &NameIndex) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
        ]
    }

    fn label(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Tabular for User {
    fn report_title() -> &'static str {
        "User Report"
    }

    fn columns() -> &'static [&'static str] {
        &["First Name", "Last Name", "Type", "Phone", "Email", "Address"]
    }

    fn row(&self, _index: &NameIndex) -> Vec<String> {
        vec![
            self.first_name.clone(),
            self.last_name.clone(),
            self.user_type.clone(),
            self.phone.clone(),
            self.email.clone(),
            self.address.clone(),
        ]
    }
}
