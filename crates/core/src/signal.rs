//! Signal items: ad-hoc community intel triaged into two lanes.
//!
//! The lane is a plain field. Any lane may be set at any time; it only drives
//! grouping in the triage board.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::{parse_variant, require_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    Closure,
    Capacity,
    Policy,
    Event,
    Alert,
    Rumor,
}

impl SignalType {
    pub const ALL: [SignalType; 6] = [
        Self::Closure,
        Self::Capacity,
        Self::Policy,
        Self::Event,
        Self::Alert,
        Self::Rumor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closure => "closure",
            Self::Capacity => "capacity",
            Self::Policy => "policy",
            Self::Event => "event",
            Self::Alert => "alert",
            Self::Rumor => "rumor",
        }
    }
}

impl FromStr for SignalType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("type", s, &Self::ALL, Self::as_str)
    }
}

/// Triage lane. New signals land in `noise` until someone promotes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalLane {
    Action,
    #[default]
    Noise,
}

impl SignalLane {
    pub const ALL: [SignalLane; 2] = [Self::Action, Self::Noise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Noise => "noise",
        }
    }
}

impl FromStr for SignalLane {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("lane", s, &Self::ALL, Self::as_str)
    }
}

/// Scores default to zero and carry no bounds.
pub const DEFAULT_SIGNAL_SCORE: i32 = 0;

pub fn validate_signal_title(title: &str) -> Result<(), CoreError> {
    require_name("title", title)
}
