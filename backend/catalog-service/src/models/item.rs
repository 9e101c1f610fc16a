use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Category;

/// Item record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
    /// Checked against the categories collection on write only; may dangle afterwards
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a new item
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub category_id: Uuid,
}

/// Validated partial update, same conventions as `CategoryChanges`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub category_id: Option<Uuid>,
}

/// Item with its category attached, `category` is `null` when the reference dangles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemWithCategory {
    #[serde(flatten)]
    pub item: Item,
    pub category: Option<Category>,
}

impl Item {
    pub fn new(id: Uuid, fields: NewItem, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            quantity: fields.quantity,
            category_id: fields.category_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the provided fields into this record
    pub fn apply(&mut self, changes: ItemChanges, now: DateTime<Utc>) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(quantity) = changes.quantity {
            self.quantity = quantity;
        }
        if let Some(category_id) = changes.category_id {
            self.category_id = category_id;
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Item {
        Item::new(
            Uuid::new_v4(),
            NewItem {
                name: "A".to_string(),
                description: Some("first".to_string()),
                price: 1.0,
                quantity: 1,
                category_id: Uuid::new_v4(),
            },
            Utc::now(),
        )
    }

    #[test]
    fn apply_only_touches_provided_fields() {
        let mut item = sample();
        let before = item.clone();

        item.apply(
            ItemChanges {
                price: Some(2.0),
                ..Default::default()
            },
            Utc::now(),
        );

        assert_eq!(item.price, 2.0);
        assert_eq!(item.name, before.name);
        assert_eq!(item.description, before.description);
        assert_eq!(item.quantity, before.quantity);
        assert_eq!(item.category_id, before.category_id);
        assert_eq!(item.created_at, before.created_at);
    }

    #[test]
    fn apply_can_clear_description() {
        let mut item = sample();
        item.apply(
            ItemChanges {
                description: Some(None),
                ..Default::default()
            },
            Utc::now(),
        );
        assert_eq!(item.description, None);
    }

    #[test]
    fn joined_item_flattens_and_keeps_null_category() {
        let item = sample();
        let joined = ItemWithCategory {
            item: item.clone(),
            category: None,
        };
        let value = serde_json::to_value(&joined).unwrap();

        assert_eq!(value["id"], serde_json::json!(item.id));
        assert_eq!(value["name"], "A");
        assert!(value.get("category").is_some());
        assert!(value["category"].is_null());
    }
}
