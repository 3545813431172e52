//! Repository for the `lists` and `list_items` tables.

use hearth_core::types::DbId;
use sqlx::PgPool;

use crate::models::list::{AddListItem, CreateList, ListItem, ResourceList, UpdateList};
use crate::models::resource::Resource;
use crate::repositories::resource_repo::COLUMNS as RESOURCE_COLUMNS;

const LIST_COLUMNS: &str = "id, name, description, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, list_id, resource_id, sort_order, notes, created_at, updated_at";

/// Curated lists of resources.
pub struct ListRepo;

impl ListRepo {
    // -----------------------------------------------------------------------
    // Lists
    // -----------------------------------------------------------------------

    pub async fn create(pool: &PgPool, input: &CreateList) -> Result<ResourceList, sqlx::Error> {
        let query = format!(
            "INSERT INTO lists (name, description) VALUES ($1, $2) RETURNING {LIST_COLUMNS}"
        );
        sqlx::query_as::<_, ResourceList>(&query)
            .bind(input.name.trim())
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ResourceList>, sqlx::Error> {
        let query = format!("SELECT {LIST_COLUMNS} FROM lists WHERE id = $1");
        sqlx::query_as::<_, ResourceList>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<ResourceList>, sqlx::Error> {
        let query = format!("SELECT {LIST_COLUMNS} FROM lists ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, ResourceList>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateList,
    ) -> Result<Option<ResourceList>, sqlx::Error> {
        let query = format!(
            "UPDATE lists SET \
                 name = COALESCE($2, name), \
                 description = COALESCE($3, description) \
             WHERE id = $1 \
             RETURNING {LIST_COLUMNS}"
        );
        sqlx::query_as::<_, ResourceList>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a list. Its items go with it (`ON DELETE CASCADE`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Member resources of a list, in item order.
    pub async fn resources(pool: &PgPool, list_id: DbId) -> Result<Vec<Resource>, sqlx::Error> {
        let query = format!(
            "SELECT {RESOURCE_COLUMNS} FROM resources \
             JOIN (SELECT resource_id, sort_order AS item_order, id AS item_id \
                   FROM list_items WHERE list_id = $1) li \
               ON li.resource_id = resources.id \
             ORDER BY li.item_order ASC, li.item_id ASC"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(list_id)
            .fetch_all(pool)
            .await
    }

    pub async fn items(pool: &PgPool, list_id: DbId) -> Result<Vec<ListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM list_items \
             WHERE list_id = $1 \
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, ListItem>(&query)
            .bind(list_id)
            .fetch_all(pool)
            .await
    }

    /// Add a resource to a list. Idempotent: adding an existing member
    /// returns the existing item unchanged.
    ///
    /// Without an explicit `sort_order` the item goes after the current last.
    pub async fn add_item(
        pool: &PgPool,
        list_id: DbId,
        input: &AddListItem,
    ) -> Result<ListItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO list_items (list_id, resource_id, sort_order, notes) \
             VALUES ($1, $2, \
                     COALESCE($3, (SELECT COALESCE(MAX(sort_order), -1) + 1 \
                                   FROM list_items WHERE list_id = $1)), \
                     $4) \
             ON CONFLICT (list_id, resource_id) DO NOTHING \
             RETURNING {ITEM_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, ListItem>(&query)
            .bind(list_id)
            .bind(input.resource_id)
            .bind(input.sort_order)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(item) => Ok(item),
            None => {
                let query = format!(
                    "SELECT {ITEM_COLUMNS} FROM list_items \
                     WHERE list_id = $1 AND resource_id = $2"
                );
                sqlx::query_as::<_, ListItem>(&query)
                    .bind(list_id)
                    .bind(input.resource_id)
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// Remove a resource from a list. Returns `true` if it was a member.
    pub async fn remove_item(
        pool: &PgPool,
        list_id: DbId,
        resource_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM list_items WHERE list_id = $1 AND resource_id = $2")
            .bind(list_id)
            .bind(resource_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
