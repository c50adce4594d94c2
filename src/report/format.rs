//! Value formatting shared by every report

use chrono::{DateTime, Utc};

/// Currency amount with exactly two decimals
pub fn money(value: f64) -> String {
    format!("{:.2}", value)
}

/// Currency amount with a `$` prefix, as used in summary lines
pub fn dollars(value: f64) -> String {
    format!("${:.2}", value)
}

/// Percentage with two decimals and a literal `%`
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn short_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn timestamp(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M:%S").to_string()
}
