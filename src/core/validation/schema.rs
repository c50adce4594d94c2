//! Schema reader that collects every violation in a form
//!
//! Resource schemas read their fields through a [`FormReader`]. Each read
//! returns the parsed value (or a placeholder when the field is invalid) and
//! records the violation, so `finish` can report all bad fields at once.

use super::{filters, validators};
use crate::core::error::{FieldViolation, ValidationError};
use crate::core::resource::FormValues;
use chrono::{DateTime, Utc};

pub struct FormReader<'a> {
    form: &'a FormValues,
    violations: Vec<FieldViolation>,
}

impl<'a> FormReader<'a> {
    pub fn new(form: &'a FormValues) -> Self {
        Self {
            form,
            violations: Vec::new(),
        }
    }

    /// Run a validator against one field, recording any violation
    pub fn check<T: Default>(
        &mut self,
        field: &str,
        validator: impl Fn(&str, &str) -> Result<T, String>,
    ) -> T {
        match validator(field, self.form.get(field)) {
            Ok(value) => value,
            Err(message) => {
                self.violations.push(FieldViolation::new(field, message));
                T::default()
            }
        }
    }

    /// Required free text, trimmed
    pub fn text(&mut self, field: &str) -> String {
        self.check(field, validators::required())
    }

    /// Optional free text; blank becomes `None`
    pub fn optional_text(&mut self, field: &str) -> Option<String> {
        filters::blank_to_none()(self.form.get(field))
    }

    /// Required non-negative decimal
    pub fn amount(&mut self, field: &str) -> f64 {
        self.check(field, validators::non_negative_number())
    }

    /// Required non-negative integer
    pub fn count(&mut self, field: &str) -> u32 {
        self.check(field, validators::whole_number())
    }

    /// Required calendar date
    pub fn date(&mut self, field: &str) -> DateTime<Utc> {
        self.check(field, validators::calendar_date())
    }

    /// Required email address
    pub fn email(&mut self, field: &str) -> String {
        self.check(field, validators::email())
    }

    /// Required value from a fixed list
    pub fn one_of(&mut self, field: &str, allowed: &'static [&'static str]) -> String {
        self.check(field, validators::in_list(allowed))
    }

    /// Record a violation that no single validator covers
    pub fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(field, message));
    }

    /// The normalized value, or every violation collected so far
    pub fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError::new(self.violations))
        }
    }
}
