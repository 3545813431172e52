//! HTTP-level tests for the staff resource endpoints.

mod common;

use axum::http::{header, StatusCode};
use common::{body_json, body_text, create_resource, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_resource_returns_201_with_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/resources",
        json!({ "name": "Northside Pantry", "category": "food", "tags": ["pantry", " pantry "] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_number());
    assert_eq!(json["name"], "Northside Pantry");
    assert_eq!(json["status"], "unverified");
    assert_eq!(json["confidenceScore"], 20);
    assert_eq!(json["isFavorite"], false);
    assert_eq!(json["tags"], json!(["pantry"]));
    assert!(json["lastVerifiedAt"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_resource_requires_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/resources", json!({ "category": "food" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["field"], "name");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_resource_caps_secondary_categories(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/resources",
        json!({ "name": "Hub", "category": "food", "categories": ["a", "b", "c"] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "categories");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_missing_resource_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/resources/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "Resource with id 999999 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_writes_only_present_fields(pool: PgPool) {
    let id = create_resource(
        &pool,
        json!({ "name": "Clinic", "category": "health", "phone": "555-0000", "hours": "9-5" }),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/resources/{id}"),
        json!({ "phone": "555-1111", "hours": null, "isFavorite": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["phone"], "555-1111");
    assert!(json["hours"].is_null());
    assert_eq!(json["isFavorite"], true);
    assert_eq!(json["name"], "Clinic");
    assert_eq!(json["category"], "health");
    assert!(json["lastVerifiedAt"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_rejects_null_for_required_field(pool: PgPool) {
    let id = create_resource(&pool, json!({ "name": "Pantry", "category": "food" })).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/resources/{id}"),
        json!({ "name": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "name");

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/resources/{id}")).await).await;
    assert_eq!(json["name"], "Pantry");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_rejects_unknown_field(pool: PgPool) {
    let id = create_resource(&pool, json!({ "name": "Clinic", "category": "health" })).await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/resources/{id}"),
        json!({ "favouriteColor": "red" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "favouriteColor");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_resource_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(app, "/api/v1/resources/999999", json!({ "phone": "1" })).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_resource_returns_204_then_404(pool: PgPool) {
    let id = create_resource(&pool, json!({ "name": "Gone", "category": "misc" })).await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/resources/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/resources/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/resources/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Listing and counting
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_and_count_agree(pool: PgPool) {
    create_resource(&pool, json!({ "name": "Bravo Food", "category": "food", "status": "verified" })).await;
    create_resource(&pool, json!({ "name": "Alpha Food", "category": "food" })).await;
    create_resource(&pool, json!({ "name": "Clinic", "category": "health" })).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/resources?category=food").await;
    assert_eq!(response.status(), StatusCode::OK);
    let rows = body_json(response).await;
    let names: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alpha Food", "Bravo Food"]);

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/resources/count?category=food&limit=1").await;
    assert_eq!(body_json(response).await, json!({ "count": 2 }));

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/resources?category=food&limit=1&offset=1").await;
    let rows = body_json(response).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["name"], "Bravo Food");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_status_and_favorite(pool: PgPool) {
    create_resource(
        &pool,
        json!({ "name": "Starred", "category": "food", "isFavorite": true, "status": "limited" }),
    )
    .await;
    create_resource(&pool, json!({ "name": "Plain", "category": "food" })).await;

    let app = common::build_test_app(pool.clone());
    let rows = body_json(get(app, "/api/v1/resources?isFavorite=true").await).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["name"], "Starred");

    let app = common::build_test_app(pool.clone());
    let rows = body_json(get(app, "/api/v1/resources?status=unverified").await).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["name"], "Plain");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/resources?status=bogus").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "status");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_matches_wildcards_literally(pool: PgPool) {
    create_resource(&pool, json!({ "name": "100% Free Meals", "category": "food" })).await;
    create_resource(&pool, json!({ "name": "1000 Meals", "category": "food" })).await;

    let app = common::build_test_app(pool);
    let rows = body_json(get(app, "/api/v1/resources?search=100%25").await).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["name"], "100% Free Meals");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_keeps_leading_space(pool: PgPool) {
    create_resource(&pool, json!({ "name": "Food bank", "category": "food" })).await;
    create_resource(&pool, json!({ "name": "Foodbank", "category": "food" })).await;

    let app = common::build_test_app(pool);
    let rows = body_json(get(app, "/api/v1/resources?search=%20bank").await).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["name"], "Food bank");
}

// ---------------------------------------------------------------------------
// Bulk operations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_update_applies_to_every_id(pool: PgPool) {
    let a = create_resource(&pool, json!({ "name": "A", "category": "food" })).await;
    let b = create_resource(&pool, json!({ "name": "B", "category": "food" })).await;
    let c = create_resource(&pool, json!({ "name": "C", "category": "food" })).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        "/api/v1/resources/bulk",
        json!({ "ids": [a, b, 999999], "updates": { "status": "needs_info" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rows = body_json(response).await;
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert!(rows
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["status"] == "needs_info"));

    let app = common::build_test_app(pool);
    let untouched = body_json(get(app, &format!("/api/v1/resources/{c}")).await).await;
    assert_eq!(untouched["status"], "unverified");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_update_requires_object(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(app, "/api/v1/resources/bulk", json!({ "ids": [1] })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_update_rejects_empty_updates(pool: PgPool) {
    let id = create_resource(&pool, json!({ "name": "A", "category": "food" })).await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/v1/resources/bulk",
        json!({ "ids": [id], "updates": {} }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "updates");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_add_tags_merges_without_duplicates(pool: PgPool) {
    let a = create_resource(&pool, json!({ "name": "A", "category": "food", "tags": ["halal"] })).await;
    let b = create_resource(&pool, json!({ "name": "B", "category": "food" })).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/resources/bulk/tags",
        json!({ "ids": [a, b, 999999], "tags": ["halal", "walk-in"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool.clone());
    let first = body_json(get(app, &format!("/api/v1/resources/{a}")).await).await;
    assert_eq!(first["tags"], json!(["halal", "walk-in"]));

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/resources/bulk/tags",
        json!({ "ids": [a], "tags": ["  "] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "tags");
}

// ---------------------------------------------------------------------------
// Export and derived vocabularies
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_export_csv_has_header_and_rows(pool: PgPool) {
    create_resource(
        &pool,
        json!({ "name": "Say \"Hi\" Center", "category": "social", "tags": ["a", "b"] }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/resources/export/csv").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert!(response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("resources.csv"));

    let text = body_text(response).await;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("\"name\",\"description\""));
    assert!(lines[0].ends_with("\"confidenceScore\",\"lastVerifiedAt\""));
    assert!(lines[1].starts_with("\"Say \"\"Hi\"\" Center\""));
    assert!(lines[1].contains("\"a; b\""));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_categories_and_tags_are_sorted_distinct(pool: PgPool) {
    create_resource(
        &pool,
        json!({ "name": "A", "category": "food", "categories": ["meals"], "tags": ["zeta", "alpha"] }),
    )
    .await;
    create_resource(&pool, json!({ "name": "B", "category": "health", "tags": ["alpha"] })).await;

    let app = common::build_test_app(pool.clone());
    let categories = body_json(get(app, "/api/v1/categories").await).await;
    assert_eq!(categories, json!(["food", "health", "meals"]));

    let app = common::build_test_app(pool);
    let tags = body_json(get(app, "/api/v1/tags").await).await;
    assert_eq!(tags, json!(["alpha", "zeta"]));
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_verification_sets_status_and_history(pool: PgPool) {
    let id = create_resource(&pool, json!({ "name": "Clinic", "category": "health" })).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/resources/{id}/verifications"),
        json!({ "method": "phone", "result": "needs_info", "notes": "voicemail full" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let event = body_json(response).await;
    assert_eq!(event["role"], "staff");
    assert_eq!(event["method"], "phone");
    assert_eq!(event["result"], "needs_info");

    let app = common::build_test_app(pool.clone());
    let resource = body_json(get(app, &format!("/api/v1/resources/{id}")).await).await;
    assert_eq!(resource["status"], "needs_info");
    assert!(resource["lastVerifiedAt"].is_string());

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/resources/{id}/verifications"),
        json!({ "method": "email", "result": "unreachable" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let resource = body_json(get(app, &format!("/api/v1/resources/{id}")).await).await;
    assert_eq!(resource["status"], "needs_info");

    let app = common::build_test_app(pool);
    let history = body_json(get(app, &format!("/api/v1/resources/{id}/verifications")).await).await;
    let results: Vec<&str> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["result"].as_str().unwrap())
        .collect();
    assert_eq!(results, vec!["unreachable", "needs_info"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_record_verification_validates_input(pool: PgPool) {
    let id = create_resource(&pool, json!({ "name": "Clinic", "category": "health" })).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/resources/{id}/verifications"),
        json!({ "method": "carrier_pigeon", "result": "verified" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["field"], "method");

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/resources/999999/verifications",
        json!({ "method": "phone", "result": "verified" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/resources/999999/verifications").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
