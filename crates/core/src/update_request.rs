//! Provider update-request review workflow.
//!
//! ```text
//! new ──► in_review ──► accepted
//!  │                 └─► rejected
//!  └──────────────────► accepted | rejected
//! ```
//!
//! `new` and `in_review` are both open; either may be decided directly.
//! `accepted` and `rejected` are terminal and nothing leaves them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::{parse_variant, validate_email, validate_optional_url};

/// Message used for every attempt to move a decided request.
pub const ALREADY_PROCESSED: &str = "Request already processed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateRequestStatus {
    #[default]
    New,
    InReview,
    Accepted,
    Rejected,
}

impl UpdateRequestStatus {
    pub const ALL: [UpdateRequestStatus; 4] =
        [Self::New, Self::InReview, Self::Accepted, Self::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InReview => "in_review",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Open requests can still be reviewed and decided.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::New | Self::InReview)
    }
}

impl FromStr for UpdateRequestStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("status", s, &Self::ALL, Self::as_str)
    }
}

/// A staff decision on an open request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Accept,
    Reject,
}

impl ReviewDecision {
    pub fn target(&self) -> UpdateRequestStatus {
        match self {
            Self::Accept => UpdateRequestStatus::Accepted,
            Self::Reject => UpdateRequestStatus::Rejected,
        }
    }
}

/// Resolve a decision against the current status.
pub fn decide(
    current: UpdateRequestStatus,
    decision: ReviewDecision,
) -> Result<UpdateRequestStatus, CoreError> {
    if !current.is_open() {
        return Err(CoreError::Conflict(ALREADY_PROCESSED.to_string()));
    }
    Ok(decision.target())
}

/// Move an open request into review. Re-entering review is a no-op.
pub fn start_review(current: UpdateRequestStatus) -> Result<UpdateRequestStatus, CoreError> {
    if !current.is_open() {
        return Err(CoreError::Conflict(ALREADY_PROCESSED.to_string()));
    }
    Ok(UpdateRequestStatus::InReview)
}

/// Audit note recorded when an accepted request changes a resource.
pub fn acceptance_note(changed_fields: &[&str]) -> String {
    format!(
        "Provider update accepted. Fields changed: {}",
        changed_fields.join(", ")
    )
}

/// Validate the provider-supplied parts of a submission.
pub fn validate_submission(submitted_by: &str, evidence_link: Option<&str>) -> Result<(), CoreError> {
    validate_email("submittedBy", submitted_by)?;
    validate_optional_url("evidenceLink", evidence_link)
}
