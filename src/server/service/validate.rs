//! Input checks shared by the services.

use crate::server::error::Error;

/// Trims `value` and rejects it when nothing is left.
pub fn required_text(field: &str, value: &str) -> Result<String, Error> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(Error::Validation(format!("{} is required", field)));
    }

    Ok(trimmed.to_string())
}

/// Trims an optional value, treating blank input as absent.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Rejects `value` when it is longer than `max` characters.
pub fn max_chars(field: &str, value: &str, max: usize) -> Result<(), Error> {
    if value.chars().count() > max {
        return Err(Error::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }

    Ok(())
}
