use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::r#trait::{CatalogRepository, StoreResult};
use crate::models::{
    Category, CategoryChanges, Item, ItemChanges, NewCategory, NewItem, SearchFilter,
};

#[derive(Default)]
struct Collections {
    categories: Vec<Category>,
    items: Vec<Item>,
}

/// Process-local store, records kept in insertion order.
/// Clones share the same collections.
#[derive(Clone, Default)]
pub struct InMemoryCatalogRepository {
    inner: Arc<RwLock<Collections>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_categories(&self, filter: &SearchFilter) -> StoreResult<Vec<Category>> {
        let store = self.inner.read().await;
        Ok(store
            .categories
            .iter()
            .filter(|c| filter.matches(&c.name, c.description.as_deref()))
            .cloned()
            .collect())
    }

    async fn find_category(&self, id: Uuid) -> StoreResult<Option<Category>> {
        let store = self.inner.read().await;
        Ok(store.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_categories(&self, ids: &[Uuid]) -> StoreResult<Vec<Category>> {
        let store = self.inner.read().await;
        Ok(store
            .categories
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn insert_category(&self, fields: NewCategory) -> StoreResult<Category> {
        let category = Category::new(Uuid::new_v4(), fields, Utc::now());
        self.inner.write().await.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        id: Uuid,
        changes: CategoryChanges,
    ) -> StoreResult<Option<Category>> {
        let mut store = self.inner.write().await;
        Ok(store.categories.iter_mut().find(|c| c.id == id).map(|c| {
            c.apply(changes, Utc::now());
            c.clone()
        }))
    }

    async fn delete_category(&self, id: Uuid) -> StoreResult<bool> {
        let mut store = self.inner.write().await;
        let before = store.categories.len();
        store.categories.retain(|c| c.id != id);
        Ok(store.categories.len() != before)
    }

    async fn list_items(&self, filter: &SearchFilter) -> StoreResult<Vec<Item>> {
        let store = self.inner.read().await;
        Ok(store
            .items
            .iter()
            .filter(|i| filter.matches(&i.name, i.description.as_deref()))
            .cloned()
            .collect())
    }

    async fn find_item(&self, id: Uuid) -> StoreResult<Option<Item>> {
        let store = self.inner.read().await;
        Ok(store.items.iter().find(|i| i.id == id).cloned())
    }

    async fn insert_item(&self, fields: NewItem) -> StoreResult<Item> {
        let item = Item::new(Uuid::new_v4(), fields, Utc::now());
        self.inner.write().await.items.push(item.clone());
        Ok(item)
    }

    async fn update_item(&self, id: Uuid, changes: ItemChanges) -> StoreResult<Option<Item>> {
        let mut store = self.inner.write().await;
        Ok(store.items.iter_mut().find(|i| i.id == id).map(|i| {
            i.apply(changes, Utc::now());
            i.clone()
        }))
    }

    async fn delete_item(&self, id: Uuid) -> StoreResult<bool> {
        let mut store = self.inner.write().await;
        let before = store.items.len();
        store.items.retain(|i| i.id != id);
        Ok(store.items.len() != before)
    }
}
