/// Data structures for categories and items
pub mod category;
pub mod item;
pub mod search;

pub use category::{Category, CategoryChanges, NewCategory};
pub use item::{Item, ItemChanges, ItemWithCategory, NewItem};
pub use search::SearchFilter;

/// Maximum length, in characters, of a `name` field
pub const MAX_NAME_LENGTH: usize = 255;
