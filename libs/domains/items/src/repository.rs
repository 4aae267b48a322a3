use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ItemResult;
use crate::models::{CreateItem, Item, PriceRange, UpdateItem};

/// Repository trait for Item persistence
///
/// Defines the primitive data-access operations for items. Store errors
/// surface to the caller unchanged (wrapped in `ItemError::Database`);
/// there is no retrying or caching at this layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Insert a new item, assigning id and timestamps
    async fn insert(&self, input: CreateItem) -> ItemResult<Item>;

    /// Fetch all items
    async fn find_all(&self) -> ItemResult<Vec<Item>>;

    /// Fetch an item by id, `None` when absent
    async fn find_by_id(&self, id: Uuid) -> ItemResult<Option<Item>>;

    /// Fetch items with `range.min <= price <= range.max`, optionally
    /// sorted by descending price
    async fn find_by_price_range(
        &self,
        range: PriceRange,
        sort_desc: bool,
    ) -> ItemResult<Vec<Item>>;

    /// Replace the provided fields of an existing item
    async fn update(&self, id: Uuid, input: UpdateItem) -> ItemResult<Item>;

    /// Delete an item by id
    async fn delete(&self, id: Uuid) -> ItemResult<()>;
}
