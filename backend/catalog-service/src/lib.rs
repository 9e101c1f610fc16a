/// Catalog Service Library
///
/// CRUD HTTP API over two related collections, `categories` and `items`, where each
/// item references a category by id. Items can also be listed with their category
/// attached.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route table
/// - `models`: Records, write payloads and the search filter
/// - `services`: Validation, reference checks and error mapping
/// - `repository`: Storage abstraction with PostgreSQL and in-memory backends
/// - `validation`: Request field normalisation and rule checks
/// - `db`: Connection pool setup
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;

use std::sync::Arc;

pub use config::Config;
pub use error::{AppError, Result};

use repository::CatalogRepository;
use services::{CategoryService, ItemService};

/// Shared per-worker state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub categories: CategoryService,
    pub items: ItemService,
    pub repo: Arc<dyn CatalogRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self {
            categories: CategoryService::new(repo.clone()),
            items: ItemService::new(repo.clone()),
            repo,
        }
    }
}
