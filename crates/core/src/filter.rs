//! Listing filters and the predicates they compile to.
//!
//! A filter is turned into an ordered list of [`Predicate`]s exactly once;
//! the repository layer renders the same list into both the page query and
//! the count query, so a count can never disagree with the rows it counts.
//! All predicates are AND-ed together and an empty list matches everything.

use crate::resource::ResourceStatus;
use crate::signal::{SignalLane, SignalType};
use crate::update_request::UpdateRequestStatus;

/// A single storage-agnostic condition on one column.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Case-insensitive, unanchored substring match.
    Contains { column: &'static str, needle: String },
    /// Exact text equality.
    Equals { column: &'static str, value: String },
    /// Exact text inequality.
    NotEquals { column: &'static str, value: String },
    /// Exact boolean equality.
    Flag { column: &'static str, value: bool },
    /// Text array contains the exact (case-sensitive) value.
    ArrayContains { column: &'static str, value: String },
}

/// Which view of the resource table a query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceScope {
    /// Staff view: every status, every column.
    Admin,
    /// Public view: closed resources are never visible.
    Public,
}

/// Optional limit/offset pair. An absent limit means "no limit".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Page {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.map(|l| l.max(0)),
            offset: offset.map(|o| o.max(0)),
        }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }
}

/// Filters accepted by resource listing and counting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<ResourceStatus>,
    pub is_favorite: Option<bool>,
    pub tag: Option<String>,
}

impl ResourceFilter {
    /// Compile the filter for the given scope.
    ///
    /// The public scope always appends `status != closed`, on top of any
    /// caller-supplied status.
    pub fn predicates(&self, scope: ResourceScope) -> Vec<Predicate> {
        let mut out = Vec::new();
        if let Some(search) = non_blank(&self.search) {
            out.push(Predicate::Contains {
                column: "name",
                needle: search.to_string(),
            });
        }
        if let Some(category) = non_blank(&self.category) {
            out.push(Predicate::Equals {
                column: "category",
                value: category.trim().to_string(),
            });
        }
        if let Some(status) = self.status {
            out.push(Predicate::Equals {
                column: "status",
                value: status.as_str().to_string(),
            });
        }
        if let Some(is_favorite) = self.is_favorite {
            out.push(Predicate::Flag {
                column: "is_favorite",
                value: is_favorite,
            });
        }
        if let Some(tag) = non_empty(&self.tag) {
            out.push(Predicate::ArrayContains {
                column: "tags",
                value: tag.to_string(),
            });
        }
        if scope == ResourceScope::Public {
            for hidden in ResourceStatus::ALL.iter().filter(|s| !s.is_public()) {
                out.push(Predicate::NotEquals {
                    column: "status",
                    value: hidden.as_str().to_string(),
                });
            }
        }
        out
    }
}

/// Filters accepted by signal listing and counting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalFilter {
    pub signal_type: Option<SignalType>,
    pub lane: Option<SignalLane>,
    pub search: Option<String>,
}

impl SignalFilter {
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut out = Vec::new();
        if let Some(signal_type) = self.signal_type {
            out.push(Predicate::Equals {
                column: "signal_type",
                value: signal_type.as_str().to_string(),
            });
        }
        if let Some(lane) = self.lane {
            out.push(Predicate::Equals {
                column: "lane",
                value: lane.as_str().to_string(),
            });
        }
        if let Some(search) = non_blank(&self.search) {
            out.push(Predicate::Contains {
                column: "title",
                needle: search.to_string(),
            });
        }
        out
    }
}

/// Filters accepted by update-request listing and counting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateRequestFilter {
    pub status: Option<UpdateRequestStatus>,
    /// Provider email; compared against the lowercased stored value.
    pub submitted_by: Option<String>,
}

impl UpdateRequestFilter {
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut out = Vec::new();
        if let Some(status) = self.status {
            out.push(Predicate::Equals {
                column: "status",
                value: status.as_str().to_string(),
            });
        }
        if let Some(email) = non_blank(&self.submitted_by) {
            out.push(Predicate::Equals {
                column: "submitted_by",
                value: email.trim().to_lowercase(),
            });
        }
        out
    }
}

/// Escape `LIKE` metacharacters so user text matches literally.
///
/// Uses backslash, PostgreSQL's default `LIKE` escape character.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Blank-only input counts as absent; anything else is kept as given.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
