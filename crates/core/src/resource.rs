//! Resource listing rules: verification status, defaults and field checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::{normalize_string_set, parse_variant, require_name, require_text};

/// Confidence score assigned when a resource is created without one.
pub const DEFAULT_CONFIDENCE_SCORE: i32 = 20;

/// A resource has one primary category plus at most this many secondary ones.
pub const MAX_SECONDARY_CATEGORIES: usize = 2;

/// Verification status of a resource.
///
/// Any status may be set from any other; there is no transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    #[default]
    Unverified,
    Verified,
    NeedsInfo,
    Closed,
    Limited,
}

impl ResourceStatus {
    pub const ALL: [ResourceStatus; 5] = [
        Self::Unverified,
        Self::Verified,
        Self::NeedsInfo,
        Self::Closed,
        Self::Limited,
    ];

    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unverified => "unverified",
            Self::Verified => "verified",
            Self::NeedsInfo => "needs_info",
            Self::Closed => "closed",
            Self::Limited => "limited",
        }
    }

    /// Whether the public surface may show a resource in this status.
    pub fn is_public(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("status", s, &Self::ALL, Self::as_str)
    }
}

/// Validate the required descriptive fields of a new resource.
pub fn validate_new_resource(
    name: &str,
    category: &str,
    categories: &[String],
) -> Result<(), CoreError> {
    require_name("name", name)?;
    require_text("category", category)?;
    validate_secondary_categories(categories)
}

/// Secondary categories are capped at [`MAX_SECONDARY_CATEGORIES`] distinct values.
pub fn validate_secondary_categories(categories: &[String]) -> Result<(), CoreError> {
    if normalize_string_set(categories).len() > MAX_SECONDARY_CATEGORIES {
        return Err(CoreError::invalid_field(
            "categories",
            format!("At most {MAX_SECONDARY_CATEGORIES} secondary categories are allowed"),
        ));
    }
    Ok(())
}
