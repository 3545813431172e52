//! Provider account model and DTOs.

use hearth_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `providers` table. `email` is stored lowercased.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: DbId,
    pub org_name: String,
    pub contact_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Self-registration payload. New providers always start unverified.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProvider {
    #[serde(default)]
    pub org_name: String,
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
}

/// Portal lookup payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderLookup {
    #[serde(default)]
    pub email: String,
}

/// Staff edit of a provider. All fields optional; email is not editable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProvider {
    pub org_name: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub verified: Option<bool>,
}
