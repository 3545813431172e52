//! Typed partial updates for resources.
//!
//! Admin edits, bulk updates and provider update requests all carry a partial
//! field map. [`ResourcePatch`] is the single typed form of that map: every
//! field is optional, nullable columns use a double `Option` so that an
//! explicit `null` clears the column while an absent key leaves it alone, and
//! unknown keys are rejected instead of ignored.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::resource::{validate_secondary_categories, ResourceStatus};
use crate::types::{DbId, Timestamp};
use crate::validation::{normalize_string_set, require_name, require_text};

/// Wire (camelCase) names accepted in a patch, in column order.
pub const PATCH_FIELDS: &[&str] = &[
    "name",
    "description",
    "category",
    "categories",
    "tags",
    "status",
    "address",
    "city",
    "state",
    "zip",
    "lat",
    "lng",
    "phone",
    "email",
    "website",
    "services",
    "hours",
    "eligibility",
    "accessInfo",
    "languages",
    "serviceArea",
    "notes",
    "internalNotes",
    "publicNotes",
    "isFavorite",
    "confidenceScore",
    "lastVerifiedAt",
    "nextVerifyDueAt",
    "providerId",
];

/// Fields whose columns are `NOT NULL`; an explicit `null` for these is refused.
const NON_NULLABLE_FIELDS: &[&str] = &[
    "name",
    "category",
    "categories",
    "tags",
    "status",
    "isFavorite",
    "confidenceScore",
];

/// Deserialize a present-but-possibly-null field as `Some(None)`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResourcePatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub category: Option<String>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub status: Option<ResourceStatus>,
    #[serde(default, deserialize_with = "nullable")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub state: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub zip: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub lat: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub lng: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub services: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub hours: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub eligibility: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub access_info: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub languages: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub service_area: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub internal_notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub public_notes: Option<Option<String>>,
    pub is_favorite: Option<bool>,
    pub confidence_score: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub last_verified_at: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "nullable")]
    pub next_verify_due_at: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "nullable")]
    pub provider_id: Option<Option<DbId>>,
}

/// A value to be written into a single resource column.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    NullableText(Option<String>),
    TextList(Vec<String>),
    Bool(bool),
    Int(i32),
    NullableFloat(Option<f64>),
    NullableId(Option<DbId>),
    NullableTime(Option<Timestamp>),
}

/// One `column = value` pair derived from a patch.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Wire name of the field (used in audit notes).
    pub field: &'static str,
    /// Database column name.
    pub column: &'static str,
    pub value: FieldValue,
}

impl ResourcePatch {
    /// Parse a JSON field map, attributing the first bad key or value to its field.
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        let map = value.as_object().ok_or_else(|| {
            CoreError::invalid("Resource changes must be a JSON object of field values")
        })?;
        Self::from_map(map)
    }

    /// Parse an already-extracted JSON object. See [`ResourcePatch::from_json`].
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, CoreError> {
        for (key, value) in map {
            if !PATCH_FIELDS.contains(&key.as_str()) {
                return Err(CoreError::invalid_field(
                    key.as_str(),
                    format!("Unknown resource field '{key}'"),
                ));
            }
            if value.is_null() && NON_NULLABLE_FIELDS.contains(&key.as_str()) {
                return Err(CoreError::invalid_field(
                    key.as_str(),
                    format!("'{key}' cannot be null"),
                ));
            }
            let mut single = Map::new();
            single.insert(key.clone(), value.clone());
            serde_json::from_value::<ResourcePatch>(Value::Object(single)).map_err(|e| {
                CoreError::invalid_field(key.as_str(), format!("Invalid value for '{key}': {e}"))
            })?;
        }

        let patch: ResourcePatch = serde_json::from_value(Value::Object(map.clone()))
            .map_err(|e| CoreError::invalid(format!("Invalid resource changes: {e}")))?;
        patch.validate()?;
        Ok(patch)
    }

    /// Check the values a patch would write. Required columns may not be blanked.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(name) = &self.name {
            require_name("name", name)?;
        }
        if let Some(category) = &self.category {
            require_text("category", category)?;
        }
        if let Some(categories) = &self.categories {
            validate_secondary_categories(categories)?;
        }
        Ok(())
    }

    /// Whether the patch would touch no column at all.
    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }

    /// Wire names of the fields this patch touches, in column order.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        self.assignments().into_iter().map(|a| a.field).collect()
    }

    /// Flatten the patch into column assignments, in column order.
    ///
    /// Tag and category lists are trimmed and de-duplicated on the way out.
    pub fn assignments(&self) -> Vec<Assignment> {
        let mut out = Vec::new();
        let mut push = |field: &'static str, column: &'static str, value: FieldValue| {
            out.push(Assignment {
                field,
                column,
                value,
            });
        };

        if let Some(v) = &self.name {
            push("name", "name", FieldValue::Text(v.trim().to_string()));
        }
        if let Some(v) = &self.description {
            push("description", "description", FieldValue::NullableText(v.clone()));
        }
        if let Some(v) = &self.category {
            push("category", "category", FieldValue::Text(v.trim().to_string()));
        }
        if let Some(v) = &self.categories {
            push("categories", "categories", FieldValue::TextList(normalize_string_set(v)));
        }
        if let Some(v) = &self.tags {
            push("tags", "tags", FieldValue::TextList(normalize_string_set(v)));
        }
        if let Some(v) = &self.status {
            push("status", "status", FieldValue::Text(v.as_str().to_string()));
        }

        let texts: [(&'static str, &'static str, &Option<Option<String>>); 16] = [
            ("address", "address", &self.address),
            ("city", "city", &self.city),
            ("state", "state", &self.state),
            ("zip", "zip", &self.zip),
            ("phone", "phone", &self.phone),
            ("email", "email", &self.email),
            ("website", "website", &self.website),
            ("services", "services", &self.services),
            ("hours", "hours", &self.hours),
            ("eligibility", "eligibility", &self.eligibility),
            ("accessInfo", "access_info", &self.access_info),
            ("languages", "languages", &self.languages),
            ("serviceArea", "service_area", &self.service_area),
            ("notes", "notes", &self.notes),
            ("internalNotes", "internal_notes", &self.internal_notes),
            ("publicNotes", "public_notes", &self.public_notes),
        ];
        for (field, column, value) in texts {
            if let Some(v) = value {
                push(field, column, FieldValue::NullableText(v.clone()));
            }
        }

        if let Some(v) = self.lat {
            push("lat", "lat", FieldValue::NullableFloat(v));
        }
        if let Some(v) = self.lng {
            push("lng", "lng", FieldValue::NullableFloat(v));
        }
        if let Some(v) = self.is_favorite {
            push("isFavorite", "is_favorite", FieldValue::Bool(v));
        }
        if let Some(v) = self.confidence_score {
            push("confidenceScore", "confidence_score", FieldValue::Int(v));
        }
        if let Some(v) = self.last_verified_at {
            push("lastVerifiedAt", "last_verified_at", FieldValue::NullableTime(v));
        }
        if let Some(v) = self.next_verify_due_at {
            push("nextVerifyDueAt", "next_verify_due_at", FieldValue::NullableTime(v));
        }
        if let Some(v) = self.provider_id {
            push("providerId", "provider_id", FieldValue::NullableId(v));
        }

        out
    }
}
