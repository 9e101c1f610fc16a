use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AppError, Operation, Resource, Result, StoreResultExt};
use crate::models::{Item, ItemChanges, ItemWithCategory, NewItem, SearchFilter};
use crate::repository::CatalogRepository;
use crate::validation::{self, FieldMap, Presence, Validator};

use super::parse_id;

const RESOURCE: Resource = Resource::Item;
const CATEGORY_FIELD: &str = "category_id";

#[derive(Clone)]
pub struct ItemService {
    repo: Arc<dyn CatalogRepository>,
}

impl ItemService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, filter: &SearchFilter) -> Result<Vec<Item>> {
        self.repo
            .list_items(filter)
            .await
            .during(RESOURCE, Operation::List)
    }

    pub async fn get(&self, id: &str) -> Result<Item> {
        let id = parse_id(id).ok_or(AppError::NotFound(RESOURCE))?;
        self.repo
            .find_item(id)
            .await
            .during(RESOURCE, Operation::Get)?
            .ok_or(AppError::NotFound(RESOURCE))
    }

    pub async fn create(&self, fields: &FieldMap) -> Result<Item> {
        let mut v = Validator::new(fields);
        let name = validation::name(&mut v, Presence::Required);
        let description = v.nullable_string("description");
        let price = v.numeric("price", Presence::Required);
        let quantity = v.integer("quantity", Presence::Required);
        let category_id = v.reference(CATEGORY_FIELD, Presence::Required);
        self.check_category(&mut v, category_id, Operation::Create)
            .await?;

        let errors = v.into_errors();
        let new_item = match (name, price, quantity, category_id) {
            (Some(name), Some(price), Some(quantity), Some(category_id)) if errors.is_empty() => {
                NewItem {
                    name,
                    description: description.flatten(),
                    price,
                    quantity,
                    category_id,
                }
            }
            _ => return Err(AppError::Validation(errors)),
        };

        let item = self
            .repo
            .insert_item(new_item)
            .await
            .during(RESOURCE, Operation::Create)?;

        info!(item_id = %item.id, category_id = %item.category_id, "Item created");
        Ok(item)
    }

    /// Validation (including the category lookup) runs before the item lookup
    pub async fn update(&self, id: &str, fields: &FieldMap) -> Result<Item> {
        let mut v = Validator::new(fields);
        let changes = ItemChanges {
            name: validation::name(&mut v, Presence::Sometimes),
            description: v.nullable_string("description"),
            price: v.numeric("price", Presence::Sometimes),
            quantity: v.integer("quantity", Presence::Sometimes),
            category_id: v.reference(CATEGORY_FIELD, Presence::Sometimes),
        };
        self.check_category(&mut v, changes.category_id, Operation::Update)
            .await?;

        if v.has_errors() {
            return Err(AppError::Validation(v.into_errors()));
        }

        let id = parse_id(id).ok_or(AppError::NotFound(RESOURCE))?;
        let item = self
            .repo
            .update_item(id, changes)
            .await
            .during(RESOURCE, Operation::Update)?
            .ok_or(AppError::NotFound(RESOURCE))?;

        info!(item_id = %item.id, "Item updated");
        Ok(item)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = parse_id(id).ok_or(AppError::NotFound(RESOURCE))?;
        let deleted = self
            .repo
            .delete_item(id)
            .await
            .during(RESOURCE, Operation::Delete)?;

        if !deleted {
            return Err(AppError::NotFound(RESOURCE));
        }

        info!(item_id = %id, "Item deleted");
        Ok(())
    }

    /// Every item with its category attached, in storage order.
    ///
    /// Two reads then an in-memory merge: the items, then one batch lookup of the
    /// distinct referenced categories. Items whose category no longer exists are
    /// kept with `category: null`.
    pub async fn list_with_category(&self) -> Result<Vec<ItemWithCategory>> {
        let items = self
            .repo
            .list_items(&SearchFilter::all())
            .await
            .during(RESOURCE, Operation::ListWithCategory)?;

        let mut seen = HashSet::new();
        let category_ids: Vec<Uuid> = items
            .iter()
            .map(|item| item.category_id)
            .filter(|id| seen.insert(*id))
            .collect();

        let categories: HashMap<Uuid, _> = self
            .repo
            .find_categories(&category_ids)
            .await
            .during(RESOURCE, Operation::ListWithCategory)?
            .into_iter()
            .map(|category| (category.id, category))
            .collect();

        debug!(
            items = items.len(),
            categories = categories.len(),
            "Merging items with categories"
        );

        Ok(items
            .into_iter()
            .map(|item| {
                let category = categories.get(&item.category_id).cloned();
                ItemWithCategory { item, category }
            })
            .collect())
    }

    async fn check_category(
        &self,
        v: &mut Validator<'_>,
        category_id: Option<Uuid>,
        operation: Operation,
    ) -> Result<()> {
        if let Some(category_id) = category_id {
            let exists = self
                .repo
                .category_exists(category_id)
                .await
                .during(RESOURCE, operation)?;
            if !exists {
                v.reject_reference(CATEGORY_FIELD);
            }
        }
        Ok(())
    }
}
