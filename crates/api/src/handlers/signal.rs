//! Handlers for the signal feed: intake items triaged into lanes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hearth_core::error::CoreError;
use hearth_core::signal::validate_signal_title;
use hearth_core::types::DbId;
use hearth_db::models::signal::{CreateSignalItem, UpdateSignalItem};
use hearth_db::repositories::SignalRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::SignalParams;
use crate::response::CountResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "SignalItem",
        id,
    })
}

/// GET /api/v1/signals
pub async fn list_signals(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SignalParams>,
) -> AppResult<impl IntoResponse> {
    let signals = SignalRepo::list(&state.pool, &params.filter()?, params.page()).await?;
    Ok(Json(signals))
}

/// GET /api/v1/signals/count
pub async fn count_signals(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SignalParams>,
) -> AppResult<impl IntoResponse> {
    let count = SignalRepo::count(&state.pool, &params.filter()?).await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/v1/signals/{id}
pub async fn get_signal(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let signal = SignalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(signal))
}

/// POST /api/v1/signals
pub async fn create_signal(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSignalItem>,
) -> AppResult<impl IntoResponse> {
    validate_signal_title(&input.title)?;

    let signal = SignalRepo::create(&state.pool, &input).await?;
    tracing::info!(signal_id = signal.id, lane = %signal.lane, "Signal created");

    Ok((StatusCode::CREATED, Json(signal)))
}

/// PUT /api/v1/signals/{id}
///
/// Partial update; moving between lanes is just `{"lane": "noise"}`.
pub async fn update_signal(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateSignalItem>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = input.title.as_deref() {
        validate_signal_title(title)?;
    }

    let signal = SignalRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(signal_id = id, "Signal updated");

    Ok(Json(signal))
}

/// DELETE /api/v1/signals/{id}
pub async fn delete_signal(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !SignalRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(signal_id = id, "Signal deleted");

    Ok(StatusCode::NO_CONTENT)
}
