//! Handlers for the managed tag and category vocabularies.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hearth_core::error::CoreError;
use hearth_core::types::DbId;
use hearth_core::vocabulary::validate_vocabulary_name;
use hearth_db::models::vocabulary::{
    CreateManagedCategory, CreateManagedTag, UpdateManagedCategory, UpdateManagedTag,
};
use hearth_db::repositories::{ManagedCategoryRepo, ManagedTagRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

fn tag_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ManagedTag",
        id,
    })
}

fn category_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ManagedCategory",
        id,
    })
}

// ---------------------------------------------------------------------------
// Managed tags
// ---------------------------------------------------------------------------

/// GET /api/v1/managed-tags
pub async fn list_tags(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tags = ManagedTagRepo::list(&state.pool).await?;
    Ok(Json(tags))
}

/// POST /api/v1/managed-tags
///
/// Names are unique; a duplicate is a 409 from `uq_managed_tags_name`.
pub async fn create_tag(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateManagedTag>,
) -> AppResult<impl IntoResponse> {
    validate_vocabulary_name(&input.name)?;

    let tag = ManagedTagRepo::create(&state.pool, &input).await?;
    tracing::info!(managed_tag_id = tag.id, name = %tag.name, "Managed tag created");

    Ok((StatusCode::CREATED, Json(tag)))
}

/// PUT /api/v1/managed-tags/{id}
pub async fn update_tag(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateManagedTag>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = input.name.as_deref() {
        validate_vocabulary_name(name)?;
    }

    let tag = ManagedTagRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| tag_not_found(id))?;
    Ok(Json(tag))
}

/// DELETE /api/v1/managed-tags/{id}
pub async fn delete_tag(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ManagedTagRepo::delete(&state.pool, id).await? {
        return Err(tag_not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Managed categories
// ---------------------------------------------------------------------------

/// GET /api/v1/managed-categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = ManagedCategoryRepo::list(&state.pool).await?;
    Ok(Json(categories))
}

/// POST /api/v1/managed-categories
pub async fn create_category(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateManagedCategory>,
) -> AppResult<impl IntoResponse> {
    validate_vocabulary_name(&input.name)?;

    let category = ManagedCategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(
        managed_category_id = category.id,
        name = %category.name,
        "Managed category created"
    );

    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/v1/managed-categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateManagedCategory>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = input.name.as_deref() {
        validate_vocabulary_name(name)?;
    }

    let category = ManagedCategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| category_not_found(id))?;
    Ok(Json(category))
}

/// DELETE /api/v1/managed-categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ManagedCategoryRepo::delete(&state.pool, id).await? {
        return Err(category_not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}
