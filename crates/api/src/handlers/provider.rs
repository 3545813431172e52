//! Handlers for provider self-registration and staff provider management.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hearth_core::error::CoreError;
use hearth_core::provider::{normalize_email, validate_registration};
use hearth_core::types::DbId;
use hearth_core::validation::{require_name, validate_email, validate_optional_url};
use hearth_db::models::provider::{ProviderLookup, RegisterProvider, UpdateProvider};
use hearth_db::repositories::{ProviderRepo, ResourceRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Provider",
        id,
    })
}

/// POST /api/v1/providers/lookup
///
/// Find a provider by email, case-insensitively.
pub async fn lookup_provider(
    State(state): State<AppState>,
    AppJson(input): AppJson<ProviderLookup>,
) -> AppResult<impl IntoResponse> {
    validate_email("email", &input.email)?;

    let provider = ProviderRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Provider",
                key: normalize_email(&input.email),
            })
        })?;
    Ok(Json(provider))
}

/// POST /api/v1/providers/register
pub async fn register_provider(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterProvider>,
) -> AppResult<impl IntoResponse> {
    validate_registration(&input.org_name, &input.email, input.website.as_deref())?;

    if ProviderRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(CoreError::Conflict(format!(
            "A provider with email '{}' is already registered",
            normalize_email(&input.email)
        ))
        .into());
    }

    let provider = ProviderRepo::create(&state.pool, &input).await?;
    tracing::info!(provider_id = provider.id, "Provider registered");

    Ok((StatusCode::CREATED, Json(provider)))
}

/// GET /api/v1/providers
pub async fn list_providers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let providers = ProviderRepo::list(&state.pool).await?;
    Ok(Json(providers))
}

/// GET /api/v1/providers/{id}
pub async fn get_provider(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let provider = ProviderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(provider))
}

/// PUT /api/v1/providers/{id}
pub async fn update_provider(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateProvider>,
) -> AppResult<impl IntoResponse> {
    if let Some(org_name) = input.org_name.as_deref() {
        require_name("orgName", org_name)?;
    }
    validate_optional_url("website", input.website.as_deref())?;

    let provider = ProviderRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(provider_id = id, "Provider updated");

    Ok(Json(provider))
}

/// GET /api/v1/providers/{id}/resources
pub async fn list_provider_resources(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    ProviderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let resources = ResourceRepo::list_by_provider(&state.pool, id).await?;
    Ok(Json(resources))
}
