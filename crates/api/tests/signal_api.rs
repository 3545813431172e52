//! HTTP-level tests for the signal feed.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_signal(pool: &PgPool, body: Value) -> Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/signals", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_signal_defaults_to_noise(pool: PgPool) {
    let signal = create_signal(
        &pool,
        json!({ "title": "Shelter full tonight", "type": "capacity" }),
    )
    .await;

    assert_eq!(signal["type"], "capacity");
    assert_eq!(signal["lane"], "noise");
    assert_eq!(signal["impactScore"], 0);
    assert_eq!(signal["bsScore"], 0);
    assert_eq!(signal["sourceReceipts"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_signal_requires_title(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/signals", json!({ "title": " ", "type": "alert" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "title");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filters_and_count_agree(pool: PgPool) {
    create_signal(&pool, json!({ "title": "Food bank closed", "type": "closure", "lane": "action" })).await;
    create_signal(&pool, json!({ "title": "Rumored closure", "type": "rumor" })).await;
    create_signal(&pool, json!({ "title": "Policy change", "type": "policy", "lane": "action" })).await;

    let app = common::build_test_app(pool.clone());
    let rows = body_json(get(app, "/api/v1/signals?lane=action").await).await;
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["title"], "Policy change", "newest first");

    let app = common::build_test_app(pool.clone());
    let count = body_json(get(app, "/api/v1/signals/count?lane=action").await).await;
    assert_eq!(count, json!({ "count": 2 }));

    let app = common::build_test_app(pool.clone());
    let rows = body_json(get(app, "/api/v1/signals?type=rumor").await).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool.clone());
    let count = body_json(get(app, "/api/v1/signals/count?search=closed").await).await;
    assert_eq!(count, json!({ "count": 1 }));

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/signals?type=gossip").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "type");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_move_lane_and_delete(pool: PgPool) {
    let signal = create_signal(&pool, json!({ "title": "Heat advisory", "type": "alert" })).await;
    let id = signal["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/signals/{id}"),
        json!({ "lane": "action", "impactScore": 8 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["lane"], "action");
    assert_eq!(updated["impactScore"], 8);
    assert_eq!(updated["title"], "Heat advisory");

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/signals/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/signals/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = put_json(app, &format!("/api/v1/signals/{id}"), json!({ "lane": "noise" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
