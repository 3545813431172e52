//! Repository for the `signal_items` table.

use hearth_core::filter::{Page, SignalFilter};
use hearth_core::signal::DEFAULT_SIGNAL_SCORE;
use hearth_core::types::DbId;
use hearth_core::validation::normalize_string_set;
use sqlx::PgPool;

use crate::filter::{PageClause, WhereClause};
use crate::models::signal::{CreateSignalItem, SignalItem, UpdateSignalItem};

const COLUMNS: &str = "\
    id, title, summary, signal_type, lane, impact_score, bs_score, \
    source_receipts, related_resource_ids, created_at, updated_at";

/// Provides CRUD and filtered listing for signal items.
pub struct SignalRepo;

impl SignalRepo {
    pub async fn create(pool: &PgPool, input: &CreateSignalItem) -> Result<SignalItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO signal_items \
                 (title, summary, signal_type, lane, impact_score, bs_score, \
                  source_receipts, related_resource_ids) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SignalItem>(&query)
            .bind(input.title.trim())
            .bind(&input.summary)
            .bind(input.signal_type.as_str())
            .bind(input.lane.unwrap_or_default().as_str())
            .bind(input.impact_score.unwrap_or(DEFAULT_SIGNAL_SCORE))
            .bind(input.bs_score.unwrap_or(DEFAULT_SIGNAL_SCORE))
            .bind(normalize_string_set(&input.source_receipts))
            .bind(input.related_resource_ids.clone())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SignalItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM signal_items WHERE id = $1");
        sqlx::query_as::<_, SignalItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List signals matching the filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &SignalFilter,
        page: Page,
    ) -> Result<Vec<SignalItem>, sqlx::Error> {
        let clause = WhereClause::from_predicates(&filter.predicates());
        let paging = PageClause::new(page, clause.param_count());
        let query = format!(
            "SELECT {COLUMNS} FROM signal_items {} \
             ORDER BY created_at DESC, id DESC {}",
            clause.sql(),
            paging.sql()
        );
        let q = clause.bind(sqlx::query_as::<_, SignalItem>(&query));
        paging.bind(q).fetch_all(pool).await
    }

    pub async fn count(pool: &PgPool, filter: &SignalFilter) -> Result<i64, sqlx::Error> {
        let clause = WhereClause::from_predicates(&filter.predicates());
        let query = format!("SELECT COUNT(*) FROM signal_items {}", clause.sql());
        let (count,) = clause
            .bind(sqlx::query_as::<_, (i64,)>(&query))
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Update a signal. Only non-`None` fields are applied; moving a signal
    /// between lanes is an ordinary field change.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSignalItem,
    ) -> Result<Option<SignalItem>, sqlx::Error> {
        let query = format!(
            "UPDATE signal_items SET \
                 title = COALESCE($2, title), \
                 summary = COALESCE($3, summary), \
                 signal_type = COALESCE($4, signal_type), \
                 lane = COALESCE($5, lane), \
                 impact_score = COALESCE($6, impact_score), \
                 bs_score = COALESCE($7, bs_score), \
                 source_receipts = COALESCE($8, source_receipts), \
                 related_resource_ids = COALESCE($9, related_resource_ids) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SignalItem>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.summary)
            .bind(input.signal_type.map(|t| t.as_str()))
            .bind(input.lane.map(|l| l.as_str()))
            .bind(input.impact_score)
            .bind(input.bs_score)
            .bind(input.source_receipts.as_deref().map(normalize_string_set))
            .bind(input.related_resource_ids.clone())
            .fetch_optional(pool)
            .await
    }

    /// Delete a signal. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM signal_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
