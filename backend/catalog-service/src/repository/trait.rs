use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{
    Category, CategoryChanges, Item, ItemChanges, NewCategory, NewItem, SearchFilter,
};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Access to the `categories` and `items` collections.
///
/// Listing returns records in insertion order. Writes are single-record; there is
/// no cross-collection transaction, so a category deleted between an existence
/// check and an item write leaves the item with a dangling `category_id`.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Cheap round-trip used by the health endpoint
    async fn ping(&self) -> StoreResult<()>;

    // ---- categories ----

    async fn list_categories(&self, filter: &SearchFilter) -> StoreResult<Vec<Category>>;

    async fn find_category(&self, id: Uuid) -> StoreResult<Option<Category>>;

    /// Batch lookup; ids with no match are skipped
    async fn find_categories(&self, ids: &[Uuid]) -> StoreResult<Vec<Category>>;

    async fn category_exists(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.find_category(id).await?.is_some())
    }

    async fn insert_category(&self, fields: NewCategory) -> StoreResult<Category>;

    /// Returns `None` when no category has this id
    async fn update_category(
        &self,
        id: Uuid,
        changes: CategoryChanges,
    ) -> StoreResult<Option<Category>>;

    /// Returns `false` when no category has this id
    async fn delete_category(&self, id: Uuid) -> StoreResult<bool>;

    // ---- items ----

    async fn list_items(&self, filter: &SearchFilter) -> StoreResult<Vec<Item>>;

    async fn find_item(&self, id: Uuid) -> StoreResult<Option<Item>>;

    async fn insert_item(&self, fields: NewItem) -> StoreResult<Item>;

    async fn update_item(&self, id: Uuid, changes: ItemChanges) -> StoreResult<Option<Item>>;

    async fn delete_item(&self, id: Uuid) -> StoreResult<bool>;
}
