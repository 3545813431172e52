//! Repository for the `update_requests` table and its review workflow.
//!
//! Review transitions lock the request row with `SELECT ... FOR UPDATE`, so
//! two concurrent decisions on the same request serialize and the loser sees
//! the terminal status.

use hearth_core::error::CoreError;
use hearth_core::filter::{Page, UpdateRequestFilter};
use hearth_core::patch::ResourcePatch;
use hearth_core::provider::normalize_email;
use hearth_core::types::DbId;
use hearth_core::update_request::{
    acceptance_note, decide, start_review, ReviewDecision, UpdateRequestStatus,
};
use hearth_core::verification::{ActorRole, VerificationMethod, VerificationResult};
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use crate::error::RepoError;
use crate::filter::{PageClause, WhereClause};
use crate::models::update_request::{CreateUpdateRequest, UpdateRequest};
use crate::models::verification_event::NewVerificationEvent;
use crate::repositories::{ResourceRepo, VerificationEventRepo};

const COLUMNS: &str = "\
    id, resource_id, submitted_by, proposed_changes, notes, evidence_link, \
    status, reviewed_by_user_id, reviewed_at, created_at, updated_at";

/// Provider-submitted change proposals and their staff review.
pub struct UpdateRequestRepo;

impl UpdateRequestRepo {
    /// Store a new request in `new` status. `submitted_by` is lowercased.
    pub async fn create(
        pool: &PgPool,
        input: &CreateUpdateRequest,
    ) -> Result<UpdateRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO update_requests \
                 (resource_id, submitted_by, proposed_changes, notes, evidence_link) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UpdateRequest>(&query)
            .bind(input.resource_id)
            .bind(normalize_email(&input.submitted_by))
            .bind(&input.proposed_changes)
            .bind(&input.notes)
            .bind(&input.evidence_link)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UpdateRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM update_requests WHERE id = $1");
        sqlx::query_as::<_, UpdateRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List requests matching the filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &UpdateRequestFilter,
        page: Page,
    ) -> Result<Vec<UpdateRequest>, sqlx::Error> {
        let clause = WhereClause::from_predicates(&filter.predicates());
        let paging = PageClause::new(page, clause.param_count());
        let query = format!(
            "SELECT {COLUMNS} FROM update_requests {} \
             ORDER BY created_at DESC, id DESC {}",
            clause.sql(),
            paging.sql()
        );
        let q = clause.bind(sqlx::query_as::<_, UpdateRequest>(&query));
        paging.bind(q).fetch_all(pool).await
    }

    pub async fn count(pool: &PgPool, filter: &UpdateRequestFilter) -> Result<i64, sqlx::Error> {
        let clause = WhereClause::from_predicates(&filter.predicates());
        let query = format!("SELECT COUNT(*) FROM update_requests {}", clause.sql());
        let (count,) = clause
            .bind(sqlx::query_as::<_, (i64,)>(&query))
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    // -----------------------------------------------------------------------
    // Review workflow
    // -----------------------------------------------------------------------

    /// Accept an open request.
    ///
    /// When the request names a resource and carries changes, the patch is
    /// applied with `last_verified_at` stamped and a provider verification
    /// event is appended. The status flip commits only together with those
    /// writes. A request naming a resource that no longer exists is refused
    /// and stays open.
    pub async fn accept(
        pool: &PgPool,
        id: DbId,
        reviewer: Option<DbId>,
    ) -> Result<UpdateRequest, RepoError> {
        let mut tx = pool.begin().await?;
        let request = Self::lock(&mut tx, id).await?;
        let status = decide(request.status.parse()?, ReviewDecision::Accept)?;

        let patch = ResourcePatch::from_json(&request.proposed_changes)?;
        match request.resource_id {
            Some(resource_id) if !patch.is_empty() => {
                ResourceRepo::apply_patch(&mut *tx, resource_id, &patch, true)
                    .await?
                    .ok_or(CoreError::NotFound {
                        entity: "Resource",
                        id: resource_id,
                    })?;

                let event = NewVerificationEvent {
                    resource_id,
                    role: ActorRole::Provider,
                    method: VerificationMethod::ProviderUpdate,
                    result: VerificationResult::Verified,
                    notes: Some(acceptance_note(&patch.changed_fields())),
                };
                VerificationEventRepo::create(&mut *tx, &event).await?;
                tracing::debug!(
                    update_request_id = id,
                    resource_id,
                    "Applied provider changes"
                );
            }
            _ => {}
        }

        let updated = Self::set_status(&mut *tx, id, status, reviewer).await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Reject an open request. No resource is touched.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        reviewer: Option<DbId>,
    ) -> Result<UpdateRequest, RepoError> {
        let mut tx = pool.begin().await?;
        let request = Self::lock(&mut tx, id).await?;
        let status = decide(request.status.parse()?, ReviewDecision::Reject)?;

        let updated = Self::set_status(&mut *tx, id, status, reviewer).await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Move an open request into review.
    pub async fn start_review(
        pool: &PgPool,
        id: DbId,
        reviewer: Option<DbId>,
    ) -> Result<UpdateRequest, RepoError> {
        let mut tx = pool.begin().await?;
        let request = Self::lock(&mut tx, id).await?;
        let status = start_review(request.status.parse()?)?;

        let updated = Self::set_status(&mut *tx, id, status, reviewer).await?;
        tx.commit().await?;
        Ok(updated)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Fetch and row-lock a request inside an existing transaction.
    async fn lock(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<UpdateRequest, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM update_requests WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, UpdateRequest>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| {
                RepoError::Domain(CoreError::NotFound {
                    entity: "UpdateRequest",
                    id,
                })
            })
    }

    /// Write a new status. Terminal statuses also stamp `reviewed_at`.
    async fn set_status<'c, E>(
        executor: E,
        id: DbId,
        status: UpdateRequestStatus,
        reviewer: Option<DbId>,
    ) -> Result<UpdateRequest, sqlx::Error>
    where
        E: PgExecutor<'c>,
    {
        let query = format!(
            "UPDATE update_requests SET \
                 status = $2, \
                 reviewed_by_user_id = COALESCE($3, reviewed_by_user_id), \
                 reviewed_at = CASE WHEN $4 THEN NOW() ELSE reviewed_at END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UpdateRequest>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(reviewer)
            .bind(!status.is_open())
            .fetch_one(executor)
            .await
    }
}
