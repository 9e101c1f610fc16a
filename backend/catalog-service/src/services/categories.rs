use std::sync::Arc;
use tracing::info;

use crate::error::{AppError, Operation, Resource, Result, StoreResultExt};
use crate::models::{Category, CategoryChanges, NewCategory, SearchFilter};
use crate::repository::CatalogRepository;
use crate::validation::{self, FieldMap, Presence, Validator};

use super::parse_id;

const RESOURCE: Resource = Resource::Category;

#[derive(Clone)]
pub struct CategoryService {
    repo: Arc<dyn CatalogRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, filter: &SearchFilter) -> Result<Vec<Category>> {
        self.repo
            .list_categories(filter)
            .await
            .during(RESOURCE, Operation::List)
    }

    pub async fn get(&self, id: &str) -> Result<Category> {
        let id = parse_id(id).ok_or(AppError::NotFound(RESOURCE))?;
        self.repo
            .find_category(id)
            .await
            .during(RESOURCE, Operation::Get)?
            .ok_or(AppError::NotFound(RESOURCE))
    }

    pub async fn create(&self, fields: &FieldMap) -> Result<Category> {
        let new_category = validate_new(fields)?;
        let category = self
            .repo
            .insert_category(new_category)
            .await
            .during(RESOURCE, Operation::Create)?;

        info!(category_id = %category.id, "Category created");
        Ok(category)
    }

    /// Validation runs before the lookup, so an invalid body on an unknown id is a 422
    pub async fn update(&self, id: &str, fields: &FieldMap) -> Result<Category> {
        let changes = validate_changes(fields)?;
        let id = parse_id(id).ok_or(AppError::NotFound(RESOURCE))?;
        let category = self
            .repo
            .update_category(id, changes)
            .await
            .during(RESOURCE, Operation::Update)?
            .ok_or(AppError::NotFound(RESOURCE))?;

        info!(category_id = %category.id, "Category updated");
        Ok(category)
    }

    /// Items referencing the category are left untouched
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = parse_id(id).ok_or(AppError::NotFound(RESOURCE))?;
        let deleted = self
            .repo
            .delete_category(id)
            .await
            .during(RESOURCE, Operation::Delete)?;

        if !deleted {
            return Err(AppError::NotFound(RESOURCE));
        }

        info!(category_id = %id, "Category deleted");
        Ok(())
    }
}

fn validate_new(fields: &FieldMap) -> Result<NewCategory> {
    let mut v = Validator::new(fields);
    let name = validation::name(&mut v, Presence::Required);
    let description = v.nullable_string("description");

    let errors = v.into_errors();
    match name {
        Some(name) if errors.is_empty() => Ok(NewCategory {
            name,
            description: description.flatten(),
        }),
        _ => Err(AppError::Validation(errors)),
    }
}

fn validate_changes(fields: &FieldMap) -> Result<CategoryChanges> {
    let mut v = Validator::new(fields);
    let changes = CategoryChanges {
        name: validation::name(&mut v, Presence::Sometimes),
        description: v.nullable_string("description"),
    };

    if v.has_errors() {
        return Err(AppError::Validation(v.into_errors()));
    }
    Ok(changes)
}
