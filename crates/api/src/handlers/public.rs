//! Handlers for the unauthenticated public directory.
//!
//! Everything here reads through the public projection: closed resources
//! never appear and staff-only columns are never selected.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use hearth_core::error::CoreError;
use hearth_core::filter::ResourceScope;
use hearth_core::types::DbId;
use hearth_db::repositories::ResourceRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::query::ResourceParams;
use crate::response::CountResponse;
use crate::state::AppState;

/// GET /api/v1/public/resources
pub async fn list_resources(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ResourceParams>,
) -> AppResult<impl IntoResponse> {
    let resources =
        ResourceRepo::list_public(&state.pool, &params.filter()?, params.page()).await?;
    Ok(Json(resources))
}

/// GET /api/v1/public/resources/count
pub async fn count_resources(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ResourceParams>,
) -> AppResult<impl IntoResponse> {
    let count = ResourceRepo::count_public(&state.pool, &params.filter()?).await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/v1/public/resources/{id}
///
/// A closed resource is reported as missing.
pub async fn get_resource(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let resource = ResourceRepo::find_public_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Resource",
            id,
        }))?;
    Ok(Json(resource))
}

/// GET /api/v1/public/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = ResourceRepo::distinct_categories(&state.pool, ResourceScope::Public).await?;
    Ok(Json(categories))
}
