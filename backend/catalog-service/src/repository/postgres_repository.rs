use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::r#trait::{CatalogRepository, StoreResult};
use crate::models::{
    Category, CategoryChanges, Item, ItemChanges, NewCategory, NewItem, SearchFilter,
};

const CATEGORY_COLUMNS: &str = "id, name, description, created_at, updated_at";
const ITEM_COLUMNS: &str =
    "id, name, description, price, quantity, category_id, created_at, updated_at";

// `strpos` keeps `%` and `_` literal; a NULL term matches every row
const SEARCH_CLAUSE: &str =
    "($1::TEXT IS NULL OR strpos(name, $1) > 0 OR strpos(COALESCE(description, ''), $1) > 0)";

/// PostgreSQL-backed catalog store
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_categories(&self, filter: &SearchFilter) -> StoreResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE {} ORDER BY seq",
            CATEGORY_COLUMNS, SEARCH_CLAUSE
        ))
        .bind(filter.term())
        .fetch_all(&self.pool)
        .await?;

        debug!(count = categories.len(), search = ?filter.term(), "Listed categories");
        Ok(categories)
    }

    async fn find_category(&self, id: Uuid) -> StoreResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE id = $1",
            CATEGORY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn find_categories(&self, ids: &[Uuid]) -> StoreResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE id = ANY($1) ORDER BY seq",
            CATEGORY_COLUMNS
        ))
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn category_exists(&self, id: Uuid) -> StoreResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn insert_category(&self, fields: NewCategory) -> StoreResult<Category> {
        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            INSERT INTO categories (id, name, description)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&fields.name)
        .bind(&fields.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    async fn update_category(
        &self,
        id: Uuid,
        changes: CategoryChanges,
    ) -> StoreResult<Option<Category>> {
        let (set_description, description) = split_nullable(changes.description);

        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            UPDATE categories SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        ))
        .bind(id)
        .bind(changes.name)
        .bind(set_description)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn delete_category(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_items(&self, filter: &SearchFilter) -> StoreResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items WHERE {} ORDER BY seq",
            ITEM_COLUMNS, SEARCH_CLAUSE
        ))
        .bind(filter.term())
        .fetch_all(&self.pool)
        .await?;

        debug!(count = items.len(), search = ?filter.term(), "Listed items");
        Ok(items)
    }

    async fn find_item(&self, id: Uuid) -> StoreResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {} FROM items WHERE id = $1",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn insert_item(&self, fields: NewItem) -> StoreResult<Item> {
        let item = sqlx::query_as::<_, Item>(&format!(
            r#"
            INSERT INTO items (id, name, description, price, quantity, category_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(fields.quantity)
        .bind(fields.category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    async fn update_item(&self, id: Uuid, changes: ItemChanges) -> StoreResult<Option<Item>> {
        let (set_description, description) = split_nullable(changes.description);

        let item = sqlx::query_as::<_, Item>(&format!(
            r#"
            UPDATE items SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                price = COALESCE($5, price),
                quantity = COALESCE($6, quantity),
                category_id = COALESCE($7, category_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(id)
        .bind(changes.name)
        .bind(set_description)
        .bind(description)
        .bind(changes.price)
        .bind(changes.quantity)
        .bind(changes.category_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn delete_item(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// `Some(v)` → overwrite with `v` (possibly NULL), `None` → keep
fn split_nullable(value: Option<Option<String>>) -> (bool, Option<String>) {
    match value {
        Some(v) => (true, v),
        None => (false, None),
    }
}
