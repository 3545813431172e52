pub mod health;
pub mod lists;
pub mod providers;
pub mod public;
pub mod resources;
pub mod signals;
pub mod update_requests;
pub mod vocabulary;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /resources                                       list, create
/// /resources/count                                 filtered count
/// /resources/bulk                                  bulk field update (PUT)
/// /resources/bulk/tags                             bulk tag append (POST)
/// /resources/export/csv                            CSV dump
/// /resources/{id}                                  get, update, delete
/// /resources/{id}/verifications                    history, record
///
/// /categories                                      distinct resource categories
/// /tags                                            distinct resource tags
///
/// /public/resources                                list (non-closed, public fields)
/// /public/resources/count                          filtered count
/// /public/resources/{id}                           get
/// /public/categories                               distinct public categories
///
/// /providers                                       list
/// /providers/lookup                                find by email (POST)
/// /providers/register                              self-registration (POST)
/// /providers/{id}                                  get, update
/// /providers/{id}/resources                        linked resources
///
/// /update-requests                                 list, submit
/// /update-requests/count                           filtered count
/// /update-requests/{id}                            get
/// /update-requests/{id}/accept                     accept (POST)
/// /update-requests/{id}/reject                     reject (POST)
/// /update-requests/{id}/review                     start review (POST)
///
/// /signals                                         list, create
/// /signals/count                                   filtered count
/// /signals/{id}                                    get, update, delete
///
/// /lists                                           list, create
/// /lists/{id}                                      get (with resources), update, delete
/// /lists/{id}/items                                add item (POST)
/// /lists/{id}/items/{resource_id}                  remove item (DELETE)
///
/// /managed-tags                                    list, create
/// /managed-tags/{id}                               update, delete
/// /managed-categories                              list, create
/// /managed-categories/{id}                         update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/resources", resources::router())
        .route("/categories", get(handlers::resource::list_categories))
        .route("/tags", get(handlers::resource::list_tags))
        .nest("/public", public::router())
        .nest("/providers", providers::router())
        .nest("/update-requests", update_requests::router())
        .nest("/signals", signals::router())
        .nest("/lists", lists::router())
        .nest("/managed-tags", vocabulary::managed_tags_router())
        .nest("/managed-categories", vocabulary::managed_categories_router())
}
