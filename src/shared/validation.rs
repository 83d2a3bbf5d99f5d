use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for optional 24h clock times on reports
    /// - Valid: "14:30", "00:00", "23:59", "" (not provided)
    /// - Invalid: "24:00", "9:30", "14:3", "2pm"
    pub static ref TIME_REGEX: Regex = Regex::new(r"^(?:(?:[01]\d|2[0-3]):[0-5]\d)?$").unwrap();
}

/// Rejects empty and whitespace-only strings
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be empty")));
    }
    Ok(())
}

/// Trims a free-text field, mapping blank input to `None`
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
