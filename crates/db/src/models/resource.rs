//! Resource entity model, public projection and DTOs.

use hearth_core::resource::ResourceStatus;
use hearth_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `resources` table (staff view, every column).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub status: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub services: Option<String>,
    pub hours: Option<String>,
    pub eligibility: Option<String>,
    pub access_info: Option<String>,
    pub languages: Option<String>,
    pub service_area: Option<String>,
    /// Legacy free-text notes kept from older imports.
    pub notes: Option<String>,
    pub internal_notes: Option<String>,
    pub public_notes: Option<String>,
    pub is_favorite: bool,
    pub confidence_score: i32,
    pub last_verified_at: Option<Timestamp>,
    pub next_verify_due_at: Option<Timestamp>,
    pub provider_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The public projection of a resource.
///
/// Staff-only columns (internal and legacy notes, favorite flag, confidence,
/// scheduling and provider linkage) are never selected.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicResource {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub status: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub services: Option<String>,
    pub hours: Option<String>,
    pub eligibility: Option<String>,
    pub access_info: Option<String>,
    pub languages: Option<String>,
    pub service_area: Option<String>,
    pub public_notes: Option<String>,
    pub last_verified_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a resource.
///
/// `name` and `category` default to empty so a missing value surfaces as a
/// field validation error rather than a body parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResource {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Defaults to `unverified` if omitted.
    pub status: Option<ResourceStatus>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub services: Option<String>,
    pub hours: Option<String>,
    pub eligibility: Option<String>,
    pub access_info: Option<String>,
    pub languages: Option<String>,
    pub service_area: Option<String>,
    pub notes: Option<String>,
    pub internal_notes: Option<String>,
    pub public_notes: Option<String>,
    pub is_favorite: Option<bool>,
    /// Defaults to 20 if omitted.
    pub confidence_score: Option<i32>,
    pub last_verified_at: Option<Timestamp>,
    pub next_verify_due_at: Option<Timestamp>,
    pub provider_id: Option<DbId>,
}

impl CreateResource {
    /// Minimal valid payload, mostly useful for seeding and tests.
    pub fn named(name: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            ..Default::default()
        }
    }
}

/// Body of `PUT /resources/bulk`.
///
/// `updates` stays an untyped field map here; it is parsed into a
/// `ResourcePatch` so unknown keys are reported by name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateResources {
    #[serde(default)]
    pub ids: Vec<DbId>,
    #[serde(default)]
    pub updates: serde_json::Value,
}

/// Body of `POST /resources/bulk/tags`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAddTags {
    #[serde(default)]
    pub ids: Vec<DbId>,
    #[serde(default)]
    pub tags: Vec<String>,
}
