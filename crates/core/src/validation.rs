//! Shared input validators.
//!
//! Every validator returns the first failure as a [`CoreError::Validation`]
//! carrying the offending field name, so callers can chain them with `?` and
//! report only the first problem.

use validator::{ValidateEmail, ValidateUrl};

use crate::error::CoreError;

/// Maximum length for short single-line text fields (names, titles).
pub const MAX_NAME_LEN: usize = 300;

/// Require a non-blank string.
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::invalid_field(field, format!("{field} is required")));
    }
    Ok(())
}

/// Require a non-blank string no longer than [`MAX_NAME_LEN`] characters.
pub fn require_name(field: &str, value: &str) -> Result<(), CoreError> {
    require_text(field, value)?;
    if value.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::invalid_field(
            field,
            format!("{field} must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(())
}

/// Validate an email address.
pub fn validate_email(field: &str, value: &str) -> Result<(), CoreError> {
    require_text(field, value)?;
    if !value.trim().validate_email() {
        return Err(CoreError::invalid_field(
            field,
            format!("{field} must be a valid email address"),
        ));
    }
    Ok(())
}

/// Validate an optional URL. Blank strings count as absent.
pub fn validate_optional_url(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value.map(str::trim) {
        Some(url) if !url.is_empty() && !url.validate_url() => Err(CoreError::invalid_field(
            field,
            format!("{field} must be a valid URL"),
        )),
        _ => Ok(()),
    }
}

/// Parse a database/wire string into one of a fixed set of enum variants.
pub(crate) fn parse_variant<T: Copy>(
    field: &str,
    value: &str,
    all: &[T],
    name: fn(&T) -> &'static str,
) -> Result<T, CoreError> {
    all.iter().copied().find(|v| name(v) == value).ok_or_else(|| {
        let valid: Vec<&str> = all.iter().map(name).collect();
        CoreError::invalid_field(
            field,
            format!("Invalid {field} '{value}'. Must be one of: {}", valid.join(", ")),
        )
    })
}

/// Trim each entry, drop blanks and collapse exact duplicates while keeping
/// first-seen order. Matching stays case-sensitive.
pub fn normalize_string_set(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if !trimmed.is_empty() && !out.iter().any(|v| v == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}
