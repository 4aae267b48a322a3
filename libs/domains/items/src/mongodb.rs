//! MongoDB implementation of ItemRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database,
    bson::{Bson, doc, to_bson},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, PriceRange, UpdateItem};
use crate::repository::ItemRepository;

/// MongoDB implementation of the ItemRepository
pub struct MongoItemRepository {
    collection: Collection<Item>,
}

impl MongoItemRepository {
    /// Create a new MongoItemRepository backed by the `items` collection
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("items");
    /// let repo = MongoItemRepository::new(db);
    /// ```
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Item>("items");
        Self { collection }
    }

    /// Create a new MongoItemRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Item>(collection_name);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Item> {
        &self.collection
    }

    fn id_filter(id: Uuid) -> mongodb::bson::Document {
        doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
    }

    /// Build the inclusive price filter document
    fn price_filter(range: PriceRange) -> mongodb::bson::Document {
        doc! { "price": { "$gte": range.min, "$lte": range.max } }
    }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    async fn insert(&self, input: CreateItem) -> ItemResult<Item> {
        let item = Item::new(input);

        self.collection.insert_one(&item).await?;

        tracing::info!(item_id = %item.id, "Item created successfully");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> ItemResult<Vec<Item>> {
        use futures_util::TryStreamExt;

        let cursor = self.collection.find(doc! {}).await?;
        let items: Vec<Item> = cursor.try_collect().await?;

        Ok(items)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        let item = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn find_by_price_range(
        &self,
        range: PriceRange,
        sort_desc: bool,
    ) -> ItemResult<Vec<Item>> {
        use futures_util::TryStreamExt;

        let mut find = self.collection.find(Self::price_filter(range));
        if sort_desc {
            find = find.sort(doc! { "price": -1 });
        }

        let cursor = find.await?;
        let items: Vec<Item> = cursor.try_collect().await?;

        Ok(items)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateItem) -> ItemResult<Item> {
        let filter = Self::id_filter(id);
        let existing = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(ItemError::NotFound(id))?;

        // Merge the provided fields and replace the document
        let mut updated = existing;
        updated.apply_update(input);

        let result = self.collection.replace_one(filter, &updated).await?;
        if result.matched_count == 0 {
            // Deleted between the load and the replace
            return Err(ItemError::NotFound(id));
        }

        tracing::info!(item_id = %id, "Item updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ItemResult<()> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count == 0 {
            return Err(ItemError::NotFound(id));
        }

        tracing::info!(item_id = %id, "Item deleted successfully");
        Ok(())
    }
}
