/// Category handlers - HTTP endpoints for category operations
use actix_web::{web, HttpResponse};

use super::FieldBody;
use crate::error::Result;
use crate::models::SearchFilter;
use crate::AppState;

/// List categories, optionally filtered by `?search=`
pub async fn list_categories(
    state: web::Data<AppState>,
    query: web::Query<SearchFilter>,
) -> Result<HttpResponse> {
    let filter = query.into_inner();
    let categories = state.categories.list(&filter).await?;
    Ok(HttpResponse::Ok().json(categories))
}

/// Get a category by ID
pub async fn get_category(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    let category = state.categories.get(&id).await?;
    Ok(HttpResponse::Ok().json(category))
}

/// Create a new category
pub async fn create_category(
    state: web::Data<AppState>,
    body: FieldBody,
) -> Result<HttpResponse> {
    let category = state.categories.create(&body.0).await?;
    Ok(HttpResponse::Created().json(category))
}

/// Update a category; absent fields keep their stored value
pub async fn update_category(
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: FieldBody,
) -> Result<HttpResponse> {
    let category = state.categories.update(&id, &body.0).await?;
    Ok(HttpResponse::Ok().json(category))
}

/// Delete a category
pub async fn delete_category(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    state.categories.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
