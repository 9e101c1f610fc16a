#![allow(dead_code)]

use actix_web::web;
use serde_json::Value;
use std::sync::Arc;

use catalog_service::repository::InMemoryCatalogRepository;
use catalog_service::AppState;

/// Fresh state over an empty in-memory store
pub fn memory_state() -> web::Data<AppState> {
    web::Data::new(AppState::new(Arc::new(InMemoryCatalogRepository::new())))
}

/// Id string of a returned record
pub fn id_of(record: &Value) -> String {
    record["id"]
        .as_str()
        .expect("record should carry a string id")
        .to_string()
}

/// Build an app over `$state` with the root route table
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state.clone())
                .configure(catalog_service::handlers::configure_routes),
        )
        .await
    };
}
