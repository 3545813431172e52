//! Handlers for provider-submitted update requests and their review.
//!
//! Submission is public. Review (accept, reject, start review) is a staff
//! action; accept applies the proposed changes to the resource and records
//! a provider verification in one transaction.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hearth_core::error::CoreError;
use hearth_core::patch::ResourcePatch;
use hearth_core::types::DbId;
use hearth_core::update_request::validate_submission;
use hearth_db::models::update_request::{CreateUpdateRequest, ReviewUpdateRequest};
use hearth_db::repositories::UpdateRequestRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::query::UpdateRequestParams;
use crate::response::CountResponse;
use crate::state::AppState;

/// GET /api/v1/update-requests
pub async fn list_update_requests(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UpdateRequestParams>,
) -> AppResult<impl IntoResponse> {
    let requests =
        UpdateRequestRepo::list(&state.pool, &params.filter()?, params.page()).await?;
    Ok(Json(requests))
}

/// GET /api/v1/update-requests/count
pub async fn count_update_requests(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<UpdateRequestParams>,
) -> AppResult<impl IntoResponse> {
    let count = UpdateRequestRepo::count(&state.pool, &params.filter()?).await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/v1/update-requests/{id}
pub async fn get_update_request(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = UpdateRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "UpdateRequest",
            id,
        }))?;
    Ok(Json(request))
}

/// POST /api/v1/update-requests
///
/// The proposed changes are checked against the editable field set up front
/// so a request that could never be accepted is refused at submission.
pub async fn create_update_request(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateUpdateRequest>,
) -> AppResult<impl IntoResponse> {
    validate_submission(&input.submitted_by, input.evidence_link.as_deref())?;
    ResourcePatch::from_json(&input.proposed_changes)?;

    let request = UpdateRequestRepo::create(&state.pool, &input).await?;
    tracing::info!(
        update_request_id = request.id,
        resource_id = ?request.resource_id,
        "Update request submitted"
    );

    Ok((StatusCode::CREATED, Json(request)))
}

/// POST /api/v1/update-requests/{id}/accept
pub async fn accept_update_request(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let reviewer = reviewer_of(&body)?;
    let request = UpdateRequestRepo::accept(&state.pool, id, reviewer).await?;
    tracing::info!(update_request_id = id, reviewer = ?reviewer, "Update request accepted");

    Ok(Json(request))
}

/// POST /api/v1/update-requests/{id}/reject
pub async fn reject_update_request(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let reviewer = reviewer_of(&body)?;
    let request = UpdateRequestRepo::reject(&state.pool, id, reviewer).await?;
    tracing::info!(update_request_id = id, reviewer = ?reviewer, "Update request rejected");

    Ok(Json(request))
}

/// POST /api/v1/update-requests/{id}/review
///
/// Move a new request into review. Repeating it is a no-op.
pub async fn start_review(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let reviewer = reviewer_of(&body)?;
    let request = UpdateRequestRepo::start_review(&state.pool, id, reviewer).await?;
    tracing::info!(update_request_id = id, "Update request in review");

    Ok(Json(request))
}

/// Review bodies are optional; an empty body means no reviewer is recorded.
fn reviewer_of(body: &Bytes) -> AppResult<Option<DbId>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let review: ReviewUpdateRequest = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid review body: {e}")))?;
    Ok(review.reviewed_by_user_id)
}
