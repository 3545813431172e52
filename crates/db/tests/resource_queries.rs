//! Integration tests for resource filtering, projection, patching and
//! the application-level delete cascade.

use hearth_core::filter::{Page, ResourceFilter, ResourceScope};
use hearth_core::patch::ResourcePatch;
use hearth_core::resource::ResourceStatus;
use hearth_core::verification::{ActorRole, VerificationMethod, VerificationResult};
use hearth_db::models::list::{AddListItem, CreateList};
use hearth_db::models::resource::CreateResource;
use hearth_db::models::verification_event::NewVerificationEvent;
use hearth_db::repositories::{ListRepo, ResourceRepo, VerificationEventRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_resource(name: &str, category: &str, status: ResourceStatus, tags: &[&str]) -> CreateResource {
    CreateResource {
        status: Some(status),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..CreateResource::named(name, category)
    }
}

async fn seed(pool: &PgPool) {
    for input in [
        new_resource("Food Shelf North", "food", ResourceStatus::Verified, &["Food Pantry"]),
        new_resource("Food Shelf South", "food", ResourceStatus::Closed, &["Food Pantry"]),
        new_resource("Eastside Clinic", "health", ResourceStatus::Unverified, &["Dental"]),
        new_resource("100% Free Meals", "food", ResourceStatus::Limited, &["food pantry"]),
    ] {
        ResourceRepo::create(pool, &input).await.unwrap();
    }
}

// ---------------------------------------------------------------------------
// Create defaults
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_applies_defaults(pool: PgPool) {
    let created = ResourceRepo::create(&pool, &CreateResource::named(" Warm Coats ", "clothing"))
        .await
        .unwrap();

    assert_eq!(created.name, "Warm Coats");
    assert_eq!(created.status, "unverified");
    assert_eq!(created.confidence_score, 20);
    assert!(!created.is_favorite);
    assert!(created.tags.is_empty());
    assert!(created.last_verified_at.is_none());
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_count_matches_unpaginated_list(pool: PgPool) {
    seed(&pool).await;

    let filters = [
        ResourceFilter::default(),
        ResourceFilter {
            category: Some("food".into()),
            ..Default::default()
        },
        ResourceFilter {
            search: Some("shelf".into()),
            status: Some(ResourceStatus::Closed),
            ..Default::default()
        },
        ResourceFilter {
            tag: Some("Food Pantry".into()),
            ..Default::default()
        },
    ];

    for filter in &filters {
        let rows = ResourceRepo::list(&pool, filter, Page::unbounded()).await.unwrap();
        let count = ResourceRepo::count(&pool, filter).await.unwrap();
        assert_eq!(rows.len() as i64, count, "admin parity for {filter:?}");

        let rows = ResourceRepo::list_public(&pool, filter, Page::unbounded())
            .await
            .unwrap();
        let count = ResourceRepo::count_public(&pool, filter).await.unwrap();
        assert_eq!(rows.len() as i64, count, "public parity for {filter:?}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tag_filter_is_exact_and_case_sensitive(pool: PgPool) {
    seed(&pool).await;

    let filter = ResourceFilter {
        tag: Some("Food Pantry".into()),
        ..Default::default()
    };
    let names: Vec<String> = ResourceRepo::list(&pool, &filter, Page::unbounded())
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Food Shelf North", "Food Shelf South"]);

    let partial = ResourceFilter {
        tag: Some("Food".into()),
        ..Default::default()
    };
    assert_eq!(ResourceRepo::count(&pool, &partial).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_is_case_insensitive_and_literal(pool: PgPool) {
    seed(&pool).await;

    let filter = ResourceFilter {
        search: Some("SHELF".into()),
        ..Default::default()
    };
    assert_eq!(ResourceRepo::count(&pool, &filter).await.unwrap(), 2);

    let percent = ResourceFilter {
        search: Some("100%".into()),
        ..Default::default()
    };
    let rows = ResourceRepo::list(&pool, &percent, Page::unbounded()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "100% Free Meals");

    let wildcard = ResourceFilter {
        search: Some("%".into()),
        ..Default::default()
    };
    assert_eq!(ResourceRepo::count(&pool, &wildcard).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_scope_always_excludes_closed(pool: PgPool) {
    seed(&pool).await;

    let closed = ResourceFilter {
        status: Some(ResourceStatus::Closed),
        ..Default::default()
    };
    assert_eq!(ResourceRepo::count(&pool, &closed).await.unwrap(), 1);
    assert_eq!(ResourceRepo::count_public(&pool, &closed).await.unwrap(), 0);
    assert!(ResourceRepo::list_public(&pool, &closed, Page::unbounded())
        .await
        .unwrap()
        .is_empty());

    let all = ResourceRepo::list_public(&pool, &ResourceFilter::default(), Page::unbounded())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|r| r.status != "closed"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_detail_hides_closed(pool: PgPool) {
    let closed = ResourceRepo::create(
        &pool,
        &new_resource("Old Shelter", "housing", ResourceStatus::Closed, &[]),
    )
    .await
    .unwrap();
    let open = ResourceRepo::create(
        &pool,
        &new_resource("New Shelter", "housing", ResourceStatus::Verified, &[]),
    )
    .await
    .unwrap();

    assert!(ResourceRepo::find_public_by_id(&pool, closed.id)
        .await
        .unwrap()
        .is_none());
    assert!(ResourceRepo::find_public_by_id(&pool, open.id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pagination_is_stable_by_name_then_id(pool: PgPool) {
    for _ in 0..3 {
        ResourceRepo::create(&pool, &CreateResource::named("Same Name", "food"))
            .await
            .unwrap();
    }

    let all = ResourceRepo::list(&pool, &ResourceFilter::default(), Page::unbounded())
        .await
        .unwrap();
    let page = ResourceRepo::list(&pool, &ResourceFilter::default(), Page::new(Some(2), Some(1)))
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, all[1].id);
    assert_eq!(page[1].id, all[2].id);
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_touches_only_present_fields(pool: PgPool) {
    let mut input = CreateResource::named("Eastside Clinic", "health");
    input.phone = Some("555-0000".into());
    input.hours = Some("9-5".into());
    let created = ResourceRepo::create(&pool, &input).await.unwrap();

    let patch = ResourcePatch::from_json(&json!({ "phone": null, "status": "verified" })).unwrap();
    let updated = ResourceRepo::apply_patch(&pool, created.id, &patch, false)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.phone, None);
    assert_eq!(updated.hours.as_deref(), Some("9-5"));
    assert_eq!(updated.status, "verified");
    assert!(updated.updated_at >= created.updated_at);
    assert!(updated.last_verified_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_missing_resource_returns_none(pool: PgPool) {
    let patch = ResourcePatch::from_json(&json!({ "phone": "1" })).unwrap();
    let result = ResourceRepo::apply_patch(&pool, 999_999, &patch, false)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_update_sets_status_on_all(pool: PgPool) {
    seed(&pool).await;
    let rows = ResourceRepo::list(&pool, &ResourceFilter::default(), Page::unbounded())
        .await
        .unwrap();
    let ids: Vec<i64> = rows.iter().take(2).map(|r| r.id).collect();

    let patch = ResourcePatch::from_json(&json!({ "status": "needs_info" })).unwrap();
    let updated = ResourceRepo::bulk_update(&pool, &ids, &patch).await.unwrap();

    assert_eq!(updated.len(), 2);
    assert!(updated.iter().all(|r| r.status == "needs_info"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_add_tags_merges_and_skips_missing(pool: PgPool) {
    let created = ResourceRepo::create(
        &pool,
        &new_resource("Eastside Clinic", "health", ResourceStatus::Verified, &["Dental"]),
    )
    .await
    .unwrap();

    let tags = vec!["Dental".to_string(), "Vision".to_string()];
    let updated = ResourceRepo::bulk_add_tags(&pool, &[created.id, 999_999], &tags)
        .await
        .unwrap();

    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].tags, vec!["Dental", "Vision"]);
}

// ---------------------------------------------------------------------------
// Derived vocabularies
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_distinct_categories_and_tags(pool: PgPool) {
    seed(&pool).await;
    let mut extra = CreateResource::named("Legal Aid", "legal");
    extra.categories = vec!["advocacy".into()];
    extra.status = Some(ResourceStatus::Closed);
    ResourceRepo::create(&pool, &extra).await.unwrap();

    let admin = ResourceRepo::distinct_categories(&pool, ResourceScope::Admin)
        .await
        .unwrap();
    assert_eq!(admin, vec!["advocacy", "food", "health", "legal"]);

    let public = ResourceRepo::distinct_categories(&pool, ResourceScope::Public)
        .await
        .unwrap();
    assert_eq!(public, vec!["food", "health"]);

    let tags = ResourceRepo::distinct_tags(&pool).await.unwrap();
    assert_eq!(tags, vec!["Dental", "Food Pantry", "food pantry"]);
}

// ---------------------------------------------------------------------------
// Delete cascade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_memberships_and_events(pool: PgPool) {
    let resource = ResourceRepo::create(&pool, &CreateResource::named("Eastside Clinic", "health"))
        .await
        .unwrap();
    let list = ListRepo::create(
        &pool,
        &CreateList {
            name: "Winter".into(),
            description: None,
        },
    )
    .await
    .unwrap();
    ListRepo::add_item(
        &pool,
        list.id,
        &AddListItem {
            resource_id: resource.id,
            sort_order: None,
            notes: None,
        },
    )
    .await
    .unwrap();
    VerificationEventRepo::create(
        &pool,
        &NewVerificationEvent {
            resource_id: resource.id,
            role: ActorRole::Staff,
            method: VerificationMethod::Phone,
            result: VerificationResult::Verified,
            notes: None,
        },
    )
    .await
    .unwrap();

    assert!(ResourceRepo::delete(&pool, resource.id).await.unwrap());

    assert!(ResourceRepo::find_by_id(&pool, resource.id).await.unwrap().is_none());
    assert!(ListRepo::items(&pool, list.id).await.unwrap().is_empty());
    assert!(VerificationEventRepo::list_for_resource(&pool, resource.id)
        .await
        .unwrap()
        .is_empty());
    assert!(ListRepo::find_by_id(&pool, list.id).await.unwrap().is_some());

    assert!(!ResourceRepo::delete(&pool, resource.id).await.unwrap());
}
