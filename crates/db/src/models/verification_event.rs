//! Verification event model and DTOs.

use hearth_core::types::{DbId, Timestamp};
use hearth_core::verification::{ActorRole, VerificationMethod, VerificationResult};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `verification_events` table. Never updated.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationEvent {
    pub id: DbId,
    pub resource_id: DbId,
    pub role: String,
    pub method: String,
    pub result: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A fully-typed event ready to insert.
#[derive(Debug, Clone)]
pub struct NewVerificationEvent {
    pub resource_id: DbId,
    pub role: ActorRole,
    pub method: VerificationMethod,
    pub result: VerificationResult,
    pub notes: Option<String>,
}

/// Request body for a manual verification action on a resource.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordVerification {
    pub role: Option<String>,
    pub method: String,
    pub result: String,
    pub notes: Option<String>,
}
