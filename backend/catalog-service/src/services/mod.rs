/// Business logic layer
///
/// Services validate request fields, check cross-collection references and map
/// storage results onto `AppError`. Handlers stay thin.
pub mod categories;
pub mod items;

pub use categories::CategoryService;
pub use items::ItemService;

use uuid::Uuid;

/// Path ids that are not UUIDs cannot match any record
pub(crate) fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
