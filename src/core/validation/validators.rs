//! Reusable field validators
//!
//! Each validator takes the field name and the raw form input and either
//! returns the parsed value or a human-readable message. A blank input is
//! always reported as missing, so a field never collects more than one
//! violation.

use chrono::{DateTime, NaiveDate, Utc};
use validator::ValidateEmail;

fn present<'a>(field: &str, raw: &'a str) -> Result<&'a str, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(format!("'{}' is required", field))
    } else {
        Ok(trimmed)
    }
}

/// Validator: field is required (non-empty after trimming)
pub fn required() -> impl Fn(&str, &str) -> Result<String, String> + Send + Sync + Clone {
    |field: &str, raw: &str| present(field, raw).map(str::to_string)
}

/// Validator: field parses to a finite number
pub fn number() -> impl Fn(&str, &str) -> Result<f64, String> + Send + Sync + Clone {
    |field: &str, raw: &str| {
        let value = present(field, raw)?;
        match value.parse::<f64>() {
            Ok(num) if num.is_finite() => Ok(num),
            _ => Err(format!(
                "'{}' must be a number (value: {})",
                field, value
            )),
        }
    }
}

/// Validator: field parses to a finite number that is zero or more
pub fn non_negative_number() -> impl Fn(&str, &str) -> Result<f64, String> + Send + Sync + Clone
{
    |field: &str, raw: &str| {
        let num = number()(field, raw)?;
        if num < 0.0 {
            Err(format!(
                "'{}' must not be negative (value: {})",
                field, num
            ))
        } else {
            Ok(num)
        }
    }
}

/// Validator: field parses to a non-negative whole number
pub fn whole_number() -> impl Fn(&str, &str) -> Result<u32, String> + Send + Sync + Clone {
    |field: &str, raw: &str| {
        let value = present(field, raw)?;
        value.parse::<u32>().map_err(|_| {
            format!(
                "'{}' must be a non-negative whole number (value: {})",
                field, value
            )
        })
    }
}

/// Validator: field is a calendar date, either `YYYY-MM-DD` or RFC 3339
///
/// Plain dates are taken as midnight UTC. No range checks are applied.
pub fn calendar_date() -> impl Fn(&str, &str) -> Result<DateTime<Utc>, String> + Send + Sync + Clone
{
    |field: &str, raw: &str| {
        let value = present(field, raw)?;
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
        }
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| {
                format!(
                    "'{}' must be a date in YYYY-MM-DD format (value: {})",
                    field, value
                )
            })
    }
}

/// Validator: field is a well-formed email address
pub fn email() -> impl Fn(&str, &str) -> Result<String, String> + Send + Sync + Clone {
    |field: &str, raw: &str| {
        let value = present(field, raw)?;
        if value.validate_email() {
            Ok(value.to_string())
        } else {
            Err(format!(
                "'{}' must be a valid email address (value: {})",
                field, value
            ))
        }
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: &'static [&'static str],
) -> impl Fn(&str, &str) -> Result<String, String> + Send + Sync + Clone {
    move |field: &str, raw: &str| {
        let value = present(field, raw)?;
        if allowed.contains(&value) {
            Ok(value.to_string())
        } else {
            Err(format!(
                "'{}' must be one of: {} (value: {})",
                field,
                allowed.join(", "),
                value
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === required() ===

    #[test]
    fn test_required_blank_returns_error() {
        let v = required();
        let result = v("name", "   ");
        assert!(result.unwrap_err().contains("required"));
    }

    #[test]
    fn test_required_trims_value() {
        let v = required();
        assert_eq!(v("name", "  Oil  ").unwrap(), "Oil");
    }

    // === number() ===

    #[test]
    fn test_number_parses_decimal() {
        let v = number();
        assert_eq!(v("price", "12.50").unwrap(), 12.5);
    }

    #[test]
    fn test_number_rejects_garbage() {
        let v = number();
        let result = v("volume", "abc");
        assert!(result.unwrap_err().contains("must be a number"));
    }

    #[test]
    fn test_number_rejects_non_finite() {
        let v = number();
        assert!(v("price", "NaN").is_err());
        assert!(v("price", "inf").is_err());
    }

    #[test]
    fn test_number_blank_is_reported_as_missing() {
        let v = number();
        assert!(v("price", "").unwrap_err().contains("required"));
    }

    // === non_negative_number() ===

    #[test]
    fn test_non_negative_accepts_zero() {
        let v = non_negative_number();
        assert_eq!(v("amount", "0").unwrap(), 0.0);
    }

    #[test]
    fn test_non_negative_rejects_negative() {
        let v = non_negative_number();
        assert!(v("amount", "-1").unwrap_err().contains("negative"));
    }

    // === whole_number() ===

    #[test]
    fn test_whole_number_parses() {
        let v = whole_number();
        assert_eq!(v("quantity", " 7 ").unwrap(), 7);
    }

    #[test]
    fn test_whole_number_rejects_fraction_and_negative() {
        let v = whole_number();
        assert!(v("quantity", "1.5").is_err());
        assert!(v("quantity", "-3").is_err());
    }

    // === calendar_date() ===

    #[test]
    fn test_calendar_date_plain_date() {
        let v = calendar_date();
        let date = v("date", "2024-01-15").unwrap();
        assert_eq!(date.to_rfc3339(), "2024-01-15T00:00:00+00:00");
    }

    #[test]
    fn test_calendar_date_rfc3339() {
        let v = calendar_date();
        let date = v("date", "2024-01-15T10:30:00.000Z").unwrap();
        assert_eq!(date.format("%Y-%m-%d").to_string(), "2024-01-15");
    }

    #[test]
    fn test_calendar_date_rejects_invalid_day() {
        let v = calendar_date();
        assert!(v("date", "2024-02-30").is_err());
        assert!(v("date", "not-a-date").unwrap_err().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_calendar_date_accepts_future() {
        let v = calendar_date();
        assert!(v("lastRestockDate", "2999-12-31").is_ok());
    }

    // === email() ===

    #[test]
    fn test_email_valid() {
        let v = email();
        assert_eq!(v("email", "jane@station.lk").unwrap(), "jane@station.lk");
    }

    #[test]
    fn test_email_invalid() {
        let v = email();
        assert!(v("email", "jane-at-station").unwrap_err().contains("email"));
    }

    // === in_list() ===

    #[test]
    fn test_in_list_accepts_known_value() {
        let v = in_list(&["Admin", "User"]);
        assert_eq!(v("type", "Admin").unwrap(), "Admin");
    }

    #[test]
    fn test_in_list_rejects_unknown_value() {
        let v = in_list(&["Admin", "User"]);
        assert!(v("type", "Root").unwrap_err().contains("one of"));
    }
}
