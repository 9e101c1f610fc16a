/// Storage layer
///
/// `CatalogRepository` is the seam between the services and a concrete store.
/// `PgCatalogRepository` is used in deployments; `InMemoryCatalogRepository` backs
/// the test-suite and `CATALOG_STORAGE=memory`.
pub mod memory_repository;
pub mod postgres_repository;
mod r#trait;

pub use memory_repository::InMemoryCatalogRepository;
pub use postgres_repository::PgCatalogRepository;
pub use r#trait::CatalogRepository;
