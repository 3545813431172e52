//! Handlers for staff resource management.
//!
//! Covers filtered listing and counting, CRUD, bulk operations, CSV export,
//! derived category/tag vocabularies and manual verification.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use hearth_core::error::CoreError;
use hearth_core::filter::{Page, ResourceFilter, ResourceScope};
use hearth_core::patch::ResourcePatch;
use hearth_core::resource::validate_new_resource;
use hearth_core::types::DbId;
use hearth_core::validation::{normalize_string_set, validate_optional_url};
use hearth_core::verification::{ActorRole, VerificationMethod, VerificationResult};
use hearth_db::models::resource::{BulkAddTags, BulkUpdateResources, CreateResource};
use hearth_db::models::verification_event::{NewVerificationEvent, RecordVerification};
use hearth_db::repositories::{ResourceRepo, VerificationEventRepo};

use crate::error::{AppError, AppResult};
use crate::export::render_csv;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::ResourceParams;
use crate::response::CountResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Resource",
        id,
    })
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /api/v1/resources
pub async fn list_resources(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ResourceParams>,
) -> AppResult<impl IntoResponse> {
    let resources = ResourceRepo::list(&state.pool, &params.filter()?, params.page()).await?;
    Ok(Json(resources))
}

/// GET /api/v1/resources/count
///
/// Same filters as the listing; pagination parameters are ignored.
pub async fn count_resources(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ResourceParams>,
) -> AppResult<impl IntoResponse> {
    let count = ResourceRepo::count(&state.pool, &params.filter()?).await?;
    Ok(Json(CountResponse { count }))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/resources/{id}
pub async fn get_resource(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let resource = ResourceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(resource))
}

/// POST /api/v1/resources
pub async fn create_resource(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateResource>,
) -> AppResult<impl IntoResponse> {
    validate_new_resource(&input.name, &input.category, &input.categories)?;
    validate_optional_url("website", input.website.as_deref())?;

    let resource = ResourceRepo::create(&state.pool, &input).await?;
    tracing::info!(resource_id = resource.id, "Resource created");

    Ok((StatusCode::CREATED, Json(resource)))
}

/// PUT /api/v1/resources/{id}
///
/// The body is a partial field map; only keys present are written.
pub async fn update_resource(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(changes): AppJson<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let patch = ResourcePatch::from_json(&changes)?;

    let resource = ResourceRepo::apply_patch(&state.pool, id, &patch, false)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(resource_id = id, fields = ?patch.changed_fields(), "Resource updated");

    Ok(Json(resource))
}

/// DELETE /api/v1/resources/{id}
///
/// Hard delete; list memberships and verification events go first.
pub async fn delete_resource(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ResourceRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(resource_id = id, "Resource deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Bulk operations
// ---------------------------------------------------------------------------

/// PUT /api/v1/resources/bulk
///
/// One set-based update for all ids. Returns the updated rows.
pub async fn bulk_update(
    State(state): State<AppState>,
    AppJson(input): AppJson<BulkUpdateResources>,
) -> AppResult<impl IntoResponse> {
    let patch = ResourcePatch::from_json(&input.updates)?;
    if patch.is_empty() {
        return Err(
            CoreError::invalid_field("updates", "At least one field to update is required").into(),
        );
    }

    let resources = ResourceRepo::bulk_update(&state.pool, &input.ids, &patch).await?;
    tracing::info!(
        requested = input.ids.len(),
        updated = resources.len(),
        "Bulk resource update"
    );

    Ok(Json(resources))
}

/// POST /api/v1/resources/bulk/tags
///
/// Appends tags to each resource in turn. Missing ids are skipped.
pub async fn bulk_add_tags(
    State(state): State<AppState>,
    AppJson(input): AppJson<BulkAddTags>,
) -> AppResult<impl IntoResponse> {
    let tags = normalize_string_set(&input.tags);
    if tags.is_empty() {
        return Err(CoreError::invalid_field("tags", "At least one tag is required").into());
    }

    let resources = ResourceRepo::bulk_add_tags(&state.pool, &input.ids, &tags).await?;
    tracing::info!(
        requested = input.ids.len(),
        updated = resources.len(),
        "Bulk tag addition"
    );

    Ok(Json(resources))
}

// ---------------------------------------------------------------------------
// Export and derived vocabularies
// ---------------------------------------------------------------------------

/// GET /api/v1/resources/export/csv
///
/// Every resource, unpaginated, in listing order.
pub async fn export_csv(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let resources =
        ResourceRepo::list(&state.pool, &ResourceFilter::default(), Page::unbounded()).await?;
    tracing::info!(rows = resources.len(), "Resource CSV export");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"resources.csv\"",
            ),
        ],
        render_csv(&resources),
    ))
}

/// GET /api/v1/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = ResourceRepo::distinct_categories(&state.pool, ResourceScope::Admin).await?;
    Ok(Json(categories))
}

/// GET /api/v1/tags
pub async fn list_tags(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tags = ResourceRepo::distinct_tags(&state.pool).await?;
    Ok(Json(tags))
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// GET /api/v1/resources/{id}/verifications
///
/// Verification history, newest first.
pub async fn list_verifications(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    ResourceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let events = VerificationEventRepo::list_for_resource(&state.pool, id).await?;
    Ok(Json(events))
}

/// POST /api/v1/resources/{id}/verifications
///
/// Record a manual check. Stamps `lastVerifiedAt` and sets the status the
/// result implies (`unreachable` leaves it alone).
pub async fn record_verification(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<RecordVerification>,
) -> AppResult<impl IntoResponse> {
    let role: ActorRole = match input.role.as_deref().filter(|r| !r.is_empty()) {
        Some(role) => role.parse()?,
        None => ActorRole::default(),
    };
    let method: VerificationMethod = input.method.parse()?;
    let result: VerificationResult = input.result.parse()?;

    let event = NewVerificationEvent {
        resource_id: id,
        role,
        method,
        result,
        notes: input.notes,
    };
    let (resource, created) = VerificationEventRepo::record(&state.pool, &event)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(
        resource_id = id,
        result = result.as_str(),
        status = %resource.status,
        "Verification recorded"
    );

    Ok((StatusCode::CREATED, Json(created)))
}
