//! Signal feed routes mounted at `/signals`.

use axum::routing::get;
use axum::Router;

use crate::handlers::signal;
use crate::state::AppState;

/// ```text
/// GET    /          -> list_signals
/// POST   /          -> create_signal
/// GET    /count     -> count_signals
/// GET    /{id}      -> get_signal
/// PUT    /{id}      -> update_signal
/// DELETE /{id}      -> delete_signal
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(signal::list_signals).post(signal::create_signal))
        .route("/count", get(signal::count_signals))
        .route(
            "/{id}",
            get(signal::get_signal)
                .put(signal::update_signal)
                .delete(signal::delete_signal),
        )
}
