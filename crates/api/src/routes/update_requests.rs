//! Update-request routes mounted at `/update-requests`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::update_request;
use crate::state::AppState;

/// ```text
/// GET  /                  -> list_update_requests
/// POST /                  -> create_update_request
/// GET  /count             -> count_update_requests
/// GET  /{id}              -> get_update_request
/// POST /{id}/accept       -> accept_update_request
/// POST /{id}/reject       -> reject_update_request
/// POST /{id}/review       -> start_review
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(update_request::list_update_requests).post(update_request::create_update_request),
        )
        .route("/count", get(update_request::count_update_requests))
        .route("/{id}", get(update_request::get_update_request))
        .route("/{id}/accept", post(update_request::accept_update_request))
        .route("/{id}/reject", post(update_request::reject_update_request))
        .route("/{id}/review", post(update_request::start_review))
}
