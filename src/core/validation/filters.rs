//! Reusable input filters
//!
//! These filters normalize raw form input before or after validation

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str) -> String + Send + Sync + Clone {
    |value: &str| value.trim().to_string()
}

/// Filter: trimmed value, or `None` when nothing is left
pub fn blank_to_none() -> impl Fn(&str) -> Option<String> + Send + Sync + Clone {
    |value: &str| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Filter: render a number the way a form field shows it (`12`, `12.5`)
pub fn number_to_input(value: f64) -> String {
    // f64's Display already drops a trailing ".0"
    value.to_string()
}
