//! Provider routes mounted at `/providers`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::provider;
use crate::state::AppState;

/// ```text
/// GET  /                  -> list_providers
/// POST /lookup            -> lookup_provider
/// POST /register          -> register_provider
/// GET  /{id}              -> get_provider
/// PUT  /{id}              -> update_provider
/// GET  /{id}/resources    -> list_provider_resources
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(provider::list_providers))
        .route("/lookup", post(provider::lookup_provider))
        .route("/register", post(provider::register_provider))
        .route(
            "/{id}",
            get(provider::get_provider).put(provider::update_provider),
        )
        .route("/{id}/resources", get(provider::list_provider_resources))
}
