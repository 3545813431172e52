//! Staff resource routes mounted at `/resources`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::resource;
use crate::state::AppState;

/// ```text
/// GET    /                        -> list_resources
/// POST   /                        -> create_resource
/// GET    /count                   -> count_resources
/// PUT    /bulk                    -> bulk_update
/// POST   /bulk/tags               -> bulk_add_tags
/// GET    /export/csv              -> export_csv
/// GET    /{id}                    -> get_resource
/// PUT    /{id}                    -> update_resource
/// DELETE /{id}                    -> delete_resource
/// GET    /{id}/verifications      -> list_verifications
/// POST   /{id}/verifications      -> record_verification
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(resource::list_resources).post(resource::create_resource),
        )
        .route("/count", get(resource::count_resources))
        .route("/bulk", put(resource::bulk_update))
        .route("/bulk/tags", post(resource::bulk_add_tags))
        .route("/export/csv", get(resource::export_csv))
        .route(
            "/{id}",
            get(resource::get_resource)
                .put(resource::update_resource)
                .delete(resource::delete_resource),
        )
        .route(
            "/{id}/verifications",
            get(resource::list_verifications).post(resource::record_verification),
        )
}
