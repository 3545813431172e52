//! Unauthenticated directory routes mounted at `/public`.

use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// ```text
/// GET /resources          -> list_resources
/// GET /resources/count    -> count_resources
/// GET /resources/{id}     -> get_resource
/// GET /categories         -> list_categories
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/resources", get(public::list_resources))
        .route("/resources/count", get(public::count_resources))
        .route("/resources/{id}", get(public::get_resource))
        .route("/categories", get(public::list_categories))
}
