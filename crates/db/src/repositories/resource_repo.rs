//! Repository for the `resources` table.
//!
//! Listing and counting share one predicate list per call (see
//! [`crate::filter::WhereClause`]). The public projection is selected with a
//! narrower column list and always carries the closed-status exclusion.

use hearth_core::filter::{Page, Predicate, ResourceFilter, ResourceScope};
use hearth_core::patch::ResourcePatch;
use hearth_core::resource::{ResourceStatus, DEFAULT_CONFIDENCE_SCORE};
use hearth_core::types::DbId;
use hearth_core::validation::normalize_string_set;
use hearth_core::vocabulary::sorted_vocabulary;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgExecutor, PgPool};

use crate::filter::{bind_field, PageClause, WhereClause};
use crate::models::resource::{CreateResource, PublicResource, Resource};

/// Column list for staff `resources` queries.
pub(crate) const COLUMNS: &str = "\
    id, name, description, category, categories, tags, status, \
    address, city, state, zip, lat, lng, phone, email, website, \
    services, hours, eligibility, access_info, languages, service_area, \
    notes, internal_notes, public_notes, is_favorite, confidence_score, \
    last_verified_at, next_verify_due_at, provider_id, created_at, updated_at";

/// Column list for the public projection.
const PUBLIC_COLUMNS: &str = "\
    id, name, description, category, categories, tags, status, \
    address, city, state, zip, lat, lng, phone, email, website, \
    services, hours, eligibility, access_info, languages, service_area, \
    public_notes, last_verified_at";

/// Stable ordering for every resource listing.
const ORDER_BY: &str = "ORDER BY name ASC, id ASC";

/// Provides CRUD, filtering and bulk operations for resources.
pub struct ResourceRepo;

impl ResourceRepo {
    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Insert a new resource. Tag and category lists are normalized first.
    pub async fn create(pool: &PgPool, input: &CreateResource) -> Result<Resource, sqlx::Error> {
        let query = format!(
            "INSERT INTO resources (\
                 name, description, category, categories, tags, status, \
                 address, city, state, zip, lat, lng, phone, email, website, \
                 services, hours, eligibility, access_info, languages, service_area, \
                 notes, internal_notes, public_notes, is_favorite, confidence_score, \
                 last_verified_at, next_verify_due_at, provider_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, \
                     $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(input.category.trim())
            .bind(normalize_string_set(&input.categories))
            .bind(normalize_string_set(&input.tags))
            .bind(input.status.unwrap_or_default().as_str())
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.zip)
            .bind(input.lat)
            .bind(input.lng)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.website)
            .bind(&input.services)
            .bind(&input.hours)
            .bind(&input.eligibility)
            .bind(&input.access_info)
            .bind(&input.languages)
            .bind(&input.service_area)
            .bind(&input.notes)
            .bind(&input.internal_notes)
            .bind(&input.public_notes)
            .bind(input.is_favorite.unwrap_or(false))
            .bind(input.confidence_score.unwrap_or(DEFAULT_CONFIDENCE_SCORE))
            .bind(input.last_verified_at)
            .bind(input.next_verify_due_at)
            .bind(input.provider_id)
            .fetch_one(pool)
            .await
    }

    /// Find a resource by ID, in any status.
    pub async fn find_by_id<'c, E>(executor: E, id: DbId) -> Result<Option<Resource>, sqlx::Error>
    where
        E: PgExecutor<'c>,
    {
        let query = format!("SELECT {COLUMNS} FROM resources WHERE id = $1");
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a resource for public display. Closed resources are not found.
    pub async fn find_public_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PublicResource>, sqlx::Error> {
        let query = format!("SELECT {PUBLIC_COLUMNS} FROM resources WHERE id = $1 AND status <> $2");
        sqlx::query_as::<_, PublicResource>(&query)
            .bind(id)
            .bind(ResourceStatus::Closed.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Apply a typed patch to one resource and stamp `updated_at`.
    ///
    /// With `stamp_verified`, `last_verified_at` is set to now and any
    /// explicit value for it in the patch is ignored. Returns `None` if no
    /// resource with the given ID exists.
    pub async fn apply_patch<'c, E>(
        executor: E,
        id: DbId,
        patch: &ResourcePatch,
        stamp_verified: bool,
    ) -> Result<Option<Resource>, sqlx::Error>
    where
        E: PgExecutor<'c>,
    {
        let assignments: Vec<_> = patch
            .assignments()
            .into_iter()
            .filter(|a| !(stamp_verified && a.column == "last_verified_at"))
            .collect();

        let mut sets = vec!["updated_at = NOW()".to_string()];
        if stamp_verified {
            sets.push("last_verified_at = NOW()".to_string());
        }
        for (i, assignment) in assignments.iter().enumerate() {
            sets.push(format!("{} = ${}", assignment.column, i + 2));
        }

        let query = format!(
            "UPDATE resources SET {} WHERE id = $1 RETURNING {COLUMNS}",
            sets.join(", ")
        );
        let mut q = sqlx::query_as::<_, Resource>(&query).bind(id);
        for assignment in &assignments {
            q = bind_field(q, &assignment.value);
        }
        q.fetch_optional(executor).await
    }

    /// Apply one patch to many resources in a single statement.
    ///
    /// Missing IDs are ignored. Rows come back in listing order.
    pub async fn bulk_update(
        pool: &PgPool,
        ids: &[DbId],
        patch: &ResourcePatch,
    ) -> Result<Vec<Resource>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let assignments = patch.assignments();
        let mut sets = vec!["updated_at = NOW()".to_string()];
        for (i, assignment) in assignments.iter().enumerate() {
            sets.push(format!("{} = ${}", assignment.column, i + 2));
        }

        let query = format!(
            "UPDATE resources SET {} WHERE id = ANY($1) RETURNING {COLUMNS}",
            sets.join(", ")
        );
        let mut q = sqlx::query_as::<_, Resource>(&query).bind(ids);
        for assignment in &assignments {
            q = bind_field(q, &assignment.value);
        }
        let mut rows = q.fetch_all(pool).await?;
        rows.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    /// Stamp `last_verified_at` and optionally set the status.
    pub async fn mark_verified<'c, E>(
        executor: E,
        id: DbId,
        status: Option<ResourceStatus>,
    ) -> Result<Option<Resource>, sqlx::Error>
    where
        E: PgExecutor<'c>,
    {
        let query = format!(
            "UPDATE resources SET \
                 last_verified_at = NOW(), \
                 status = COALESCE($2, status), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .bind(status.map(|s| s.as_str()))
            .fetch_optional(executor)
            .await
    }

    /// Replace a resource's tag set.
    pub async fn set_tags<'c, E>(
        executor: E,
        id: DbId,
        tags: &[String],
    ) -> Result<Option<Resource>, sqlx::Error>
    where
        E: PgExecutor<'c>,
    {
        let query = format!(
            "UPDATE resources SET tags = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .bind(tags.to_vec())
            .fetch_optional(executor)
            .await
    }

    /// Append tags to each resource in turn, keeping existing tags first.
    ///
    /// Each resource is read, merged and written on its own; missing IDs are
    /// skipped and a failure part-way leaves earlier resources updated.
    pub async fn bulk_add_tags(
        pool: &PgPool,
        ids: &[DbId],
        tags: &[String],
    ) -> Result<Vec<Resource>, sqlx::Error> {
        let mut updated = Vec::with_capacity(ids.len());
        for &id in ids {
            let Some(existing) = Self::find_by_id(pool, id).await? else {
                tracing::debug!(resource_id = id, "Skipping tag addition for missing resource");
                continue;
            };
            let merged: Vec<String> = existing.tags.iter().chain(tags).cloned().collect();
            if let Some(resource) = Self::set_tags(pool, id, &normalize_string_set(&merged)).await? {
                updated.push(resource);
            }
        }
        Ok(updated)
    }

    /// Hard-delete a resource together with its list memberships and
    /// verification events, in one transaction.
    ///
    /// Returns `true` if the resource existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM list_items WHERE resource_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM verification_events WHERE resource_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Filtered listing
    // -----------------------------------------------------------------------

    /// Staff listing: every status, every column.
    pub async fn list(
        pool: &PgPool,
        filter: &ResourceFilter,
        page: Page,
    ) -> Result<Vec<Resource>, sqlx::Error> {
        select_page(pool, COLUMNS, &filter.predicates(ResourceScope::Admin), page).await
    }

    /// Count matching the staff listing for the same filter.
    pub async fn count(pool: &PgPool, filter: &ResourceFilter) -> Result<i64, sqlx::Error> {
        count_matching(pool, &filter.predicates(ResourceScope::Admin)).await
    }

    /// Public listing: closed resources excluded, restricted columns.
    pub async fn list_public(
        pool: &PgPool,
        filter: &ResourceFilter,
        page: Page,
    ) -> Result<Vec<PublicResource>, sqlx::Error> {
        select_page(
            pool,
            PUBLIC_COLUMNS,
            &filter.predicates(ResourceScope::Public),
            page,
        )
        .await
    }

    /// Count matching the public listing for the same filter.
    pub async fn count_public(pool: &PgPool, filter: &ResourceFilter) -> Result<i64, sqlx::Error> {
        count_matching(pool, &filter.predicates(ResourceScope::Public)).await
    }

    /// Resources linked to a provider account.
    pub async fn list_by_provider(
        pool: &PgPool,
        provider_id: DbId,
    ) -> Result<Vec<Resource>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM resources WHERE provider_id = $1 {ORDER_BY}");
        sqlx::query_as::<_, Resource>(&query)
            .bind(provider_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Derived vocabularies
    // -----------------------------------------------------------------------

    /// Distinct primary and secondary categories, sorted.
    pub async fn distinct_categories(
        pool: &PgPool,
        scope: ResourceScope,
    ) -> Result<Vec<String>, sqlx::Error> {
        let clause = WhereClause::from_predicates(&ResourceFilter::default().predicates(scope));
        let query = format!(
            "SELECT category FROM resources {where_sql} \
             UNION \
             SELECT unnest(categories) FROM resources {where_sql}",
            where_sql = clause.sql()
        );
        let rows = clause
            .bind(sqlx::query_as::<_, (String,)>(&query))
            .fetch_all(pool)
            .await?;
        Ok(sorted_vocabulary(rows.into_iter().map(|(c,)| c).collect()))
    }

    /// Distinct tags across all resources, sorted.
    pub async fn distinct_tags(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (String,)>("SELECT DISTINCT unnest(tags) FROM resources")
            .fetch_all(pool)
            .await?;
        Ok(sorted_vocabulary(rows.into_iter().map(|(t,)| t).collect()))
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

async fn select_page<T>(
    pool: &PgPool,
    columns: &str,
    predicates: &[Predicate],
    page: Page,
) -> Result<Vec<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let clause = WhereClause::from_predicates(predicates);
    let paging = PageClause::new(page, clause.param_count());
    let query = format!(
        "SELECT {columns} FROM resources {} {ORDER_BY} {}",
        clause.sql(),
        paging.sql()
    );
    let q = clause.bind(sqlx::query_as::<_, T>(&query));
    paging.bind(q).fetch_all(pool).await
}

async fn count_matching(pool: &PgPool, predicates: &[Predicate]) -> Result<i64, sqlx::Error> {
    let clause = WhereClause::from_predicates(predicates);
    let query = format!("SELECT COUNT(*) FROM resources {}", clause.sql());
    let (count,) = clause
        .bind(sqlx::query_as::<_, (i64,)>(&query))
        .fetch_one(pool)
        .await?;
    Ok(count)
}
