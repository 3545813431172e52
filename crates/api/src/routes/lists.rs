//! Curated list routes mounted at `/lists`.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::list;
use crate::state::AppState;

/// ```text
/// GET    /                              -> list_lists
/// POST   /                              -> create_list
/// GET    /{id}                          -> get_list
/// PUT    /{id}                          -> update_list
/// DELETE /{id}                          -> delete_list
/// POST   /{id}/items                    -> add_item
/// DELETE /{id}/items/{resource_id}      -> remove_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_lists).post(list::create_list))
        .route(
            "/{id}",
            get(list::get_list)
                .put(list::update_list)
                .delete(list::delete_list),
        )
        .route("/{id}/items", post(list::add_item))
        .route("/{id}/items/{resource_id}", delete(list::remove_item))
}
