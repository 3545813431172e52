//! Provider accounts for the self-service portal.
//!
//! Email is the only identifier. There is no credential: looking a provider
//! up by email is an unauthenticated convenience, not access control.

use crate::error::CoreError;
use crate::validation::{require_name, validate_email, validate_optional_url};

/// Canonical form of a provider email: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate a self-registration.
pub fn validate_registration(
    org_name: &str,
    email: &str,
    website: Option<&str>,
) -> Result<(), CoreError> {
    require_name("orgName", org_name)?;
    validate_email("email", email)?;
    validate_optional_url("website", website)
}
