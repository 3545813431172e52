//! Curated vocabularies and named lists.
//!
//! Managed tags and categories are maintained on their own. Resource rows
//! carry free-form tag and category strings that are not required to appear
//! in these vocabularies and the two are never reconciled.

use crate::error::CoreError;
use crate::validation::require_name;

/// Validate the name of a managed tag or managed category.
pub fn validate_vocabulary_name(name: &str) -> Result<(), CoreError> {
    require_name("name", name)
}

/// Validate the name of a curated resource list.
pub fn validate_list_name(name: &str) -> Result<(), CoreError> {
    require_name("name", name)
}

/// Sort a set of distinct values alphabetically, dropping blanks.
pub fn sorted_vocabulary(mut values: Vec<String>) -> Vec<String> {
    values.retain(|v| !v.trim().is_empty());
    values.sort();
    values.dedup();
    values
}
