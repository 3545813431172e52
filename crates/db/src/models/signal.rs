//! Signal item model and DTOs.

use hearth_core::signal::{SignalLane, SignalType};
use hearth_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `signal_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalItem {
    pub id: DbId,
    pub title: String,
    pub summary: Option<String>,
    #[serde(rename = "type")]
    pub signal_type: String,
    pub lane: String,
    pub impact_score: i32,
    pub bs_score: i32,
    pub source_receipts: Vec<String>,
    pub related_resource_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSignalItem {
    #[serde(default)]
    pub title: String,
    pub summary: Option<String>,
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    /// Defaults to `noise`.
    pub lane: Option<SignalLane>,
    pub impact_score: Option<i32>,
    pub bs_score: Option<i32>,
    #[serde(default)]
    pub source_receipts: Vec<String>,
    #[serde(default)]
    pub related_resource_ids: Vec<DbId>,
}

/// Partial signal edit. Lane changes go through here like any other field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSignalItem {
    pub title: Option<String>,
    pub summary: Option<String>,
    #[serde(rename = "type")]
    pub signal_type: Option<SignalType>,
    pub lane: Option<SignalLane>,
    pub impact_score: Option<i32>,
    pub bs_score: Option<i32>,
    pub source_receipts: Option<Vec<String>>,
    pub related_resource_ids: Option<Vec<DbId>>,
}
