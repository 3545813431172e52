//! Managed vocabulary routes.
//!
//! Two routers are provided:
//! - `managed_tags_router()` mounted at `/managed-tags`
//! - `managed_categories_router()` mounted at `/managed-categories`

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::vocabulary;
use crate::state::AppState;

/// ```text
/// GET    /          -> list_tags
/// POST   /          -> create_tag
/// PUT    /{id}      -> update_tag
/// DELETE /{id}      -> delete_tag
/// ```
pub fn managed_tags_router() -> Router<AppState> {
    Router::new()
        .route("/", get(vocabulary::list_tags).post(vocabulary::create_tag))
        .route(
            "/{id}",
            put(vocabulary::update_tag).delete(vocabulary::delete_tag),
        )
}

/// ```text
/// GET    /          -> list_categories
/// POST   /          -> create_category
/// PUT    /{id}      -> update_category
/// DELETE /{id}      -> delete_category
/// ```
pub fn managed_categories_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(vocabulary::list_categories).post(vocabulary::create_category),
        )
        .route(
            "/{id}",
            put(vocabulary::update_category).delete(vocabulary::delete_category),
        )
}
