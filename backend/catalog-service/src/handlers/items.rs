/// Item handlers - HTTP endpoints for item operations
use actix_web::{web, HttpResponse};

use super::FieldBody;
use crate::error::Result;
use crate::models::SearchFilter;
use crate::AppState;

/// List items, optionally filtered by `?search=`
pub async fn list_items(
    state: web::Data<AppState>,
    query: web::Query<SearchFilter>,
) -> Result<HttpResponse> {
    let filter = query.into_inner();
    let items = state.items.list(&filter).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// Get an item by ID
pub async fn get_item(state: web::Data<AppState>, id: web::Path<String>) -> Result<HttpResponse> {
    let item = state.items.get(&id).await?;
    Ok(HttpResponse::Ok().json(item))
}

/// Create a new item; `category_id` must name an existing category
pub async fn create_item(state: web::Data<AppState>, body: FieldBody) -> Result<HttpResponse> {
    let item = state.items.create(&body.0).await?;
    Ok(HttpResponse::Created().json(item))
}

/// Update an item; absent fields keep their stored value
pub async fn update_item(
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: FieldBody,
) -> Result<HttpResponse> {
    let item = state.items.update(&id, &body.0).await?;
    Ok(HttpResponse::Ok().json(item))
}

/// Delete an item
pub async fn delete_item(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    state.items.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// All items with their category nested under `category` (`null` if it was deleted)
/// GET /items-with-category
pub async fn list_items_with_category(state: web::Data<AppState>) -> Result<HttpResponse> {
    let items = state.items.list_with_category().await?;
    Ok(HttpResponse::Ok().json(items))
}
