//! Repository for the `providers` table.

use hearth_core::provider::normalize_email;
use hearth_core::types::DbId;
use sqlx::PgPool;

use crate::models::provider::{Provider, RegisterProvider, UpdateProvider};

const COLUMNS: &str = "\
    id, org_name, contact_name, email, phone, website, verified, \
    created_at, updated_at";

/// Provider accounts, keyed case-insensitively by email.
pub struct ProviderRepo;

impl ProviderRepo {
    /// Look up a provider by email, ignoring case and surrounding whitespace.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Provider>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM providers WHERE email = $1");
        sqlx::query_as::<_, Provider>(&query)
            .bind(normalize_email(email))
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Provider>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM providers WHERE id = $1");
        sqlx::query_as::<_, Provider>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Provider>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM providers ORDER BY org_name ASC, id ASC");
        sqlx::query_as::<_, Provider>(&query).fetch_all(pool).await
    }

    /// Register a new, unverified provider.
    ///
    /// A duplicate email fails on `uq_providers_email`.
    pub async fn create(pool: &PgPool, input: &RegisterProvider) -> Result<Provider, sqlx::Error> {
        let query = format!(
            "INSERT INTO providers (org_name, contact_name, email, phone, website) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Provider>(&query)
            .bind(input.org_name.trim())
            .bind(&input.contact_name)
            .bind(normalize_email(&input.email))
            .bind(&input.phone)
            .bind(&input.website)
            .fetch_one(pool)
            .await
    }

    /// Update a provider. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProvider,
    ) -> Result<Option<Provider>, sqlx::Error> {
        let query = format!(
            "UPDATE providers SET \
                 org_name = COALESCE($2, org_name), \
                 contact_name = COALESCE($3, contact_name), \
                 phone = COALESCE($4, phone), \
                 website = COALESCE($5, website), \
                 verified = COALESCE($6, verified) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Provider>(&query)
            .bind(id)
            .bind(input.org_name.as_deref().map(str::trim))
            .bind(&input.contact_name)
            .bind(&input.phone)
            .bind(&input.website)
            .bind(input.verified)
            .fetch_optional(pool)
            .await
    }
}
