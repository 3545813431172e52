//! Handlers for curated resource lists.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hearth_core::error::CoreError;
use hearth_core::types::DbId;
use hearth_core::vocabulary::validate_list_name;
use hearth_db::models::list::{AddListItem, CreateList, ListWithResources, UpdateList};
use hearth_db::repositories::{ListRepo, ResourceRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "List", id })
}

/// GET /api/v1/lists
pub async fn list_lists(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let lists = ListRepo::list(&state.pool).await?;
    Ok(Json(lists))
}

/// POST /api/v1/lists
pub async fn create_list(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateList>,
) -> AppResult<impl IntoResponse> {
    validate_list_name(&input.name)?;

    let list = ListRepo::create(&state.pool, &input).await?;
    tracing::info!(list_id = list.id, "List created");

    Ok((StatusCode::CREATED, Json(list)))
}

/// GET /api/v1/lists/{id}
///
/// The list with its member resources in item order.
pub async fn get_list(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let list = ListRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let resources = ListRepo::resources(&state.pool, id).await?;

    Ok(Json(ListWithResources { list, resources }))
}

/// PUT /api/v1/lists/{id}
pub async fn update_list(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateList>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = input.name.as_deref() {
        validate_list_name(name)?;
    }

    let list = ListRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(list))
}

/// DELETE /api/v1/lists/{id}
pub async fn delete_list(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ListRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(list_id = id, "List deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/lists/{id}/items
///
/// Adding a resource that is already a member returns the existing item.
pub async fn add_item(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<AddListItem>,
) -> AppResult<impl IntoResponse> {
    ListRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ResourceRepo::find_by_id(&state.pool, input.resource_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Resource",
            id: input.resource_id,
        }))?;

    let item = ListRepo::add_item(&state.pool, id, &input).await?;
    tracing::info!(list_id = id, resource_id = input.resource_id, "List item added");

    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /api/v1/lists/{id}/items/{resource_id}
///
/// Removing a resource that is not a member is a no-op.
pub async fn remove_item(
    State(state): State<AppState>,
    AppPath((id, resource_id)): AppPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    ListRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let removed = ListRepo::remove_item(&state.pool, id, resource_id).await?;
    tracing::debug!(list_id = id, resource_id, removed, "List item removal");

    Ok(StatusCode::NO_CONTENT)
}
