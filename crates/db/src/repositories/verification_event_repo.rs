//! Repository for the append-only `verification_events` table.

use hearth_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::resource::Resource;
use crate::models::verification_event::{NewVerificationEvent, VerificationEvent};
use crate::repositories::ResourceRepo;

const COLUMNS: &str = "id, resource_id, role, method, result, notes, created_at, updated_at";

/// Appends and reads verification events. Events are never edited.
pub struct VerificationEventRepo;

impl VerificationEventRepo {
    /// Append an event. Callers run this inside the transaction that made
    /// the change being recorded.
    pub async fn create<'c, E>(
        executor: E,
        event: &NewVerificationEvent,
    ) -> Result<VerificationEvent, sqlx::Error>
    where
        E: PgExecutor<'c>,
    {
        let query = format!(
            "INSERT INTO verification_events (resource_id, role, method, result, notes) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VerificationEvent>(&query)
            .bind(event.resource_id)
            .bind(event.role.as_str())
            .bind(event.method.as_str())
            .bind(event.result.as_str())
            .bind(&event.notes)
            .fetch_one(executor)
            .await
    }

    /// All events for a resource, newest first.
    pub async fn list_for_resource(
        pool: &PgPool,
        resource_id: DbId,
    ) -> Result<Vec<VerificationEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM verification_events \
             WHERE resource_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, VerificationEvent>(&query)
            .bind(resource_id)
            .fetch_all(pool)
            .await
    }

    /// Record a manual verification: stamp the resource, apply the status the
    /// result implies, and append the event, all in one transaction.
    ///
    /// Returns `None` if the resource does not exist.
    pub async fn record(
        pool: &PgPool,
        event: &NewVerificationEvent,
    ) -> Result<Option<(Resource, VerificationEvent)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let resource = ResourceRepo::mark_verified(
            &mut *tx,
            event.resource_id,
            event.result.implied_status(),
        )
        .await?;
        let Some(resource) = resource else {
            return Ok(None);
        };
        let created = Self::create(&mut *tx, event).await?;

        tx.commit().await?;
        Ok(Some((resource, created)))
    }
}
