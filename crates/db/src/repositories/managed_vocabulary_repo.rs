//! Repositories for the `managed_tags` and `managed_categories` tables.
//!
//! Duplicate names fail on the `uq_managed_*_name` unique indexes.

use hearth_core::types::DbId;
use sqlx::PgPool;

use crate::models::vocabulary::{
    CreateManagedCategory, CreateManagedTag, ManagedCategory, ManagedTag, UpdateManagedCategory,
    UpdateManagedTag,
};

const TAG_COLUMNS: &str = "id, name, description, color, sort_order, created_at, updated_at";

const CATEGORY_COLUMNS: &str = "id, name, description, icon, sort_order, created_at, updated_at";

/// Curated tag vocabulary.
pub struct ManagedTagRepo;

impl ManagedTagRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<ManagedTag>, sqlx::Error> {
        let query = format!("SELECT {TAG_COLUMNS} FROM managed_tags ORDER BY sort_order, name");
        sqlx::query_as::<_, ManagedTag>(&query).fetch_all(pool).await
    }

    pub async fn create(pool: &PgPool, input: &CreateManagedTag) -> Result<ManagedTag, sqlx::Error> {
        let query = format!(
            "INSERT INTO managed_tags (name, description, color, sort_order) \
             VALUES ($1, $2, $3, COALESCE($4, 0)) \
             RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, ManagedTag>(&query)
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(&input.color)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateManagedTag,
    ) -> Result<Option<ManagedTag>, sqlx::Error> {
        let query = format!(
            "UPDATE managed_tags SET \
                 name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 color = COALESCE($4, color), \
                 sort_order = COALESCE($5, sort_order) \
             WHERE id = $1 \
             RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, ManagedTag>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(&input.color)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM managed_tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Curated category vocabulary.
pub struct ManagedCategoryRepo;

impl ManagedCategoryRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<ManagedCategory>, sqlx::Error> {
        let query =
            format!("SELECT {CATEGORY_COLUMNS} FROM managed_categories ORDER BY sort_order, name");
        sqlx::query_as::<_, ManagedCategory>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreateManagedCategory,
    ) -> Result<ManagedCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO managed_categories (name, description, icon, sort_order) \
             VALUES ($1, $2, $3, COALESCE($4, 0)) \
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, ManagedCategory>(&query)
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(&input.icon)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateManagedCategory,
    ) -> Result<Option<ManagedCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE managed_categories SET \
                 name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 icon = COALESCE($4, icon), \
                 sort_order = COALESCE($5, sort_order) \
             WHERE id = $1 \
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, ManagedCategory>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(&input.icon)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM managed_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
