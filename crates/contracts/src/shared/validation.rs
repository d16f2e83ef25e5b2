//! Form validation primitives shared by every Add/Edit dialog.
//!
//! Validators never stop at the first problem: they push into [`FieldErrors`]
//! so a form can highlight every offending field at once.

use super::dates::{is_before, parse_date};
use chrono::NaiveDate;
use thiserror::Error;

/// Reason a single field was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("{0} cannot be in the past")]
    InPast(&'static str),

    #[error("{field} has an invalid format: {expected}")]
    InvalidFormat {
        field: &'static str,
        expected: &'static str,
    },

    #[error("{field} is out of range: {detail}")]
    OutOfRange { field: &'static str, detail: String },

    #[error("{0} must contain at least one entry")]
    Empty(&'static str),

    #[error("{0} cannot be checked until the purchase order is loaded")]
    Unverified(&'static str),
}

/// Ordered list of `(field, error)` pairs collected while validating a form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, ValidationError)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, error: ValidationError) {
        self.errors.push((field, error));
    }

    pub fn extend(&mut self, other: FieldErrors) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|(f, _)| *f == field)
    }

    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|(f, _)| *f == field).map(|(_, e)| e)
    }

    /// Drops the errors of one field, e.g. once the user edits it
    pub fn clear_field(&mut self, field: &str) {
        self.errors.retain(|(f, _)| *f != field);
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, ValidationError)> {
        self.errors.iter()
    }

    /// Message of the first error, used for the error banner of a dialog
    pub fn first_message(&self) -> Option<String> {
        self.errors.first().map(|(_, e)| e.to_string())
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Parse an amount typed by the user. Thousands separators are allowed.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn require_text(errors: &mut FieldErrors, field: &'static str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(field, ValidationError::Required(field));
        false
    } else {
        true
    }
}

/// Amount must parse and be strictly positive
pub fn require_positive(errors: &mut FieldErrors, field: &'static str, raw: &str) -> Option<f64> {
    if raw.trim().is_empty() {
        errors.push(field, ValidationError::Required(field));
        return None;
    }
    match parse_amount(raw) {
        Some(v) if v > 0.0 => Some(v),
        Some(_) => {
            errors.push(field, ValidationError::NotPositive(field));
            None
        }
        None => {
            errors.push(
                field,
                ValidationError::InvalidFormat {
                    field,
                    expected: "a number",
                },
            );
            None
        }
    }
}

pub fn require_date(errors: &mut FieldErrors, field: &'static str, raw: &str) -> Option<NaiveDate> {
    if raw.trim().is_empty() {
        errors.push(field, ValidationError::Required(field));
        return None;
    }
    match parse_date(raw) {
        Some(d) => Some(d),
        None => {
            errors.push(
                field,
                ValidationError::InvalidFormat {
                    field,
                    expected: "YYYY-MM-DD",
                },
            );
            None
        }
    }
}

/// Date is required and must not precede `today`.
///
/// When `unchanged_from` holds the stored value of an edited record and the
/// user did not touch the date, a past date is accepted.
pub fn require_date_not_past(
    errors: &mut FieldErrors,
    field: &'static str,
    raw: &str,
    today: NaiveDate,
    unchanged_from: Option<&str>,
) -> Option<NaiveDate> {
    let date = require_date(errors, field, raw)?;
    let untouched = unchanged_from
        .and_then(parse_date)
        .map(|orig| orig == date)
        .unwrap_or(false);
    if is_before(date, today) && !untouched {
        errors.push(field, ValidationError::InPast(field));
        return None;
    }
    Some(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,25,000.50"), Some(125000.5));
        assert_eq!(parse_amount(" 42 "), Some(42.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("12a"), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn test_require_positive_rejects_zero_and_empty() {
        let mut errors = FieldErrors::new();
        assert_eq!(require_positive(&mut errors, "amount", "0"), None);
        assert_eq!(errors.get("amount"), Some(&ValidationError::NotPositive("amount")));

        let mut errors = FieldErrors::new();
        assert_eq!(require_positive(&mut errors, "amount", "  "), None);
        assert_eq!(errors.get("amount"), Some(&ValidationError::Required("amount")));

        let mut errors = FieldErrors::new();
        assert_eq!(require_positive(&mut errors, "amount", "-5"), None);
        assert!(errors.has("amount"));
    }

    #[test]
    fn test_clear_field_keeps_other_errors() {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "remarks", "");
        require_positive(&mut errors, "amount", "0");
        errors.clear_field("remarks");
        assert_eq!(errors.len(), 1);
        assert!(errors.has("amount"));
    }

    #[test]
    fn test_require_date_not_past() {
        let today = day("2026-10-14");

        let mut errors = FieldErrors::new();
        assert_eq!(
            require_date_not_past(&mut errors, "planned_date", "2026-10-14", today, None),
            Some(today)
        );
        assert!(errors.is_empty());

        require_date_not_past(&mut errors, "planned_date", "2026-10-13", today, None);
        assert_eq!(
            errors.get("planned_date"),
            Some(&ValidationError::InPast("planned_date"))
        );
    }

    #[test]
    fn test_unchanged_past_date_is_accepted_on_edit() {
        let today = day("2026-10-14");
        let mut errors = FieldErrors::new();
        let res = require_date_not_past(
            &mut errors,
            "planned_date",
            "2026-09-01",
            today,
            Some("2026-09-01"),
        );
        assert!(res.is_some());
        assert!(errors.is_empty());

        require_date_not_past(
            &mut errors,
            "planned_date",
            "2026-09-02",
            today,
            Some("2026-09-01"),
        );
        assert!(errors.has("planned_date"));
    }

    #[test]
    fn test_first_message() {
        let mut errors = FieldErrors::new();
        assert!(errors.first_message().is_none());
        errors.push("remarks", ValidationError::Required("remarks"));
        errors.push("amount", ValidationError::NotPositive("amount"));
        assert_eq!(errors.first_message().as_deref(), Some("remarks is required"));
        assert_eq!(errors.len(), 2);
        assert!(errors.into_result().is_err());
    }
}
