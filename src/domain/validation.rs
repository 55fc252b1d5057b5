use chrono::NaiveDate;
use thiserror::Error;

use super::parse_date;

/// Rejections for user input, raised before anything reaches the ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "Invalid student name. Please enter only the first name or first name followed by a last name without any additional whitespace."
    )]
    InvalidName(String),

    #[error("Invalid transaction amount. Please enter a valid float number.")]
    InvalidAmount(String),

    #[error(
        "Invalid transaction date format. Please enter date in mm-dd-yyyy format or leave blank for current date."
    )]
    InvalidDate(String),
}

/// Maximum number of whitespace-separated words in a student name.
pub const MAX_NAME_WORDS: usize = 2;

/// Check a student name and return it with surrounding whitespace removed.
/// A name is a first name, optionally followed by a last name.
pub fn validate_student_name(input: &str) -> Result<String, ValidationError> {
    let name = input.trim();
    let words = name.split_whitespace().count();
    if (1..=MAX_NAME_WORDS).contains(&words) {
        Ok(name.to_string())
    } else {
        Err(ValidationError::InvalidName(input.to_string()))
    }
}

/// Parse a transaction amount. Any finite floating-point number is accepted.
pub fn parse_amount(input: &str) -> Result<f64, ValidationError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| ValidationError::InvalidAmount(input.to_string()))
}

/// Parse an optional transaction date. Blank input means "use today",
/// which the ledger resolves at the moment the transaction is recorded.
pub fn parse_optional_date(input: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_date(raw)
            .map(Some)
            .map_err(|_| ValidationError::InvalidDate(raw.to_string())),
    }
}
