//! Verification events: the append-only audit trail of a resource.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::resource::ResourceStatus;
use crate::validation::parse_variant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    #[default]
    Staff,
    Provider,
    System,
}

impl ActorRole {
    pub const ALL: [ActorRole; 3] = [Self::Staff, Self::Provider, Self::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Provider => "provider",
            Self::System => "system",
        }
    }
}

impl FromStr for ActorRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("role", s, &Self::ALL, Self::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMethod {
    Phone,
    Email,
    Website,
    InPerson,
    ProviderUpdate,
    Other,
}

impl VerificationMethod {
    pub const ALL: [VerificationMethod; 6] = [
        Self::Phone,
        Self::Email,
        Self::Website,
        Self::InPerson,
        Self::ProviderUpdate,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Website => "website",
            Self::InPerson => "in_person",
            Self::ProviderUpdate => "provider_update",
            Self::Other => "other",
        }
    }
}

impl FromStr for VerificationMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("method", s, &Self::ALL, Self::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationResult {
    Verified,
    NeedsInfo,
    Closed,
    Limited,
    Unreachable,
}

impl VerificationResult {
    pub const ALL: [VerificationResult; 5] = [
        Self::Verified,
        Self::NeedsInfo,
        Self::Closed,
        Self::Limited,
        Self::Unreachable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::NeedsInfo => "needs_info",
            Self::Closed => "closed",
            Self::Limited => "limited",
            Self::Unreachable => "unreachable",
        }
    }

    /// The resource status a manual check with this result implies, if any.
    ///
    /// `unreachable` records the attempt but leaves the status alone.
    pub fn implied_status(&self) -> Option<ResourceStatus> {
        match self {
            Self::Verified => Some(ResourceStatus::Verified),
            Self::NeedsInfo => Some(ResourceStatus::NeedsInfo),
            Self::Closed => Some(ResourceStatus::Closed),
            Self::Limited => Some(ResourceStatus::Limited),
            Self::Unreachable => None,
        }
    }
}

impl FromStr for VerificationResult {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("result", s, &Self::ALL, Self::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_update_method_string() {
        assert_eq!(VerificationMethod::ProviderUpdate.as_str(), "provider_update");
        assert_eq!(
            "provider_update".parse::<VerificationMethod>().unwrap(),
            VerificationMethod::ProviderUpdate
        );
    }

    #[test]
    fn unreachable_does_not_change_status() {
        assert_eq!(VerificationResult::Unreachable.implied_status(), None);
        assert_eq!(
            VerificationResult::NeedsInfo.implied_status(),
            Some(ResourceStatus::NeedsInfo)
        );
    }

    #[test]
    fn role_defaults_to_staff() {
        assert_eq!(ActorRole::default(), ActorRole::Staff);
        assert!("admin".parse::<ActorRole>().is_err());
    }
}
