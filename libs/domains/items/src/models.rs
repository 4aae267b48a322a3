use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Item entity - the single resource this service manages.
///
/// Serialized with camelCase field names; the document stored in MongoDB has
/// the same shape, so what the API returns is exactly what is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier, assigned at creation (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Item name
    pub name: String,
    /// Optional free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price
    pub price: f64,
    /// Optional flag carried through unchanged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_props: Option<bool>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new item
///
/// `name` and `price` are required; a missing field is rejected during
/// deserialization, an empty name by validation.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub add_props: Option<bool>,
}

/// DTO for updating an existing item
///
/// Only the provided fields are replaced; everything else keeps its
/// current value. Last write wins on concurrent updates.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub add_props: Option<bool>,
}

/// Inclusive price interval for the price-range queries
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Validate, ToSchema)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl Item {
    /// Create a new item from a CreateItem DTO, assigning id and timestamps
    pub fn new(input: CreateItem) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            add_props: input.add_props,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from an UpdateItem DTO
    pub fn apply_update(&mut self, update: UpdateItem) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(add_props) = update.add_props {
            self.add_props = Some(add_props);
        }
        self.updated_at = Utc::now();
    }
}
