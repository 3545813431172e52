//! Shared response payload types for API handlers.
//!
//! Entities and lists are returned bare; only counts get a wrapper.

use serde::Serialize;

/// `{ "count": n }` body returned by every `/count` endpoint.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}
