//! Update request model and DTOs.

use hearth_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `update_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub id: DbId,
    pub resource_id: Option<DbId>,
    pub submitted_by: String,
    pub proposed_changes: serde_json::Value,
    pub notes: Option<String>,
    pub evidence_link: Option<String>,
    pub status: String,
    pub reviewed_by_user_id: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Provider submission payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUpdateRequest {
    pub resource_id: Option<DbId>,
    #[serde(default)]
    pub submitted_by: String,
    #[serde(default = "empty_object")]
    pub proposed_changes: serde_json::Value,
    pub notes: Option<String>,
    pub evidence_link: Option<String>,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Body of accept/reject/review calls.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdateRequest {
    pub reviewed_by_user_id: Option<DbId>,
}
