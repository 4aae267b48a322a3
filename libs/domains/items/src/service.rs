//! Item Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, PriceRange, UpdateItem};
use crate::repository::ItemRepository;

/// Item service providing business logic operations
///
/// The service layer validates inputs and orchestrates repository
/// operations. It is deliberately thin: this domain has no rules beyond
/// boundary validation.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a new ItemService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new item
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create_item(&self, input: CreateItem) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        self.repository.insert(input).await
    }

    /// List all items
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.find_all().await
    }

    /// Find an item by id
    ///
    /// Returns `None` when no item has the given id; the caller decides
    /// how to render that.
    #[instrument(skip(self))]
    pub async fn find_item(&self, id: Uuid) -> ItemResult<Option<Item>> {
        self.repository.find_by_id(id).await
    }

    /// List items whose price falls within the inclusive range
    #[instrument(skip(self))]
    pub async fn items_in_price_range(
        &self,
        range: PriceRange,
        sort_desc: bool,
    ) -> ItemResult<Vec<Item>> {
        self.repository.find_by_price_range(range, sort_desc).await
    }

    /// Update an existing item
    #[instrument(skip(self, input))]
    pub async fn update_item(&self, id: Uuid, input: UpdateItem) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete an item
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: Uuid) -> ItemResult<()> {
        self.repository.delete(id).await
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockItemRepository;

    fn sample_input() -> CreateItem {
        CreateItem {
            name: "lamp".to_string(),
            description: None,
            price: 24.0,
            add_props: None,
        }
    }

    #[tokio::test]
    async fn test_create_item_rejects_empty_name_before_persistence() {
        // No expectations: the repository must not be touched
        let mock_repo = MockItemRepository::new();
        let service = ItemService::new(mock_repo);

        let result = service
            .create_item(CreateItem {
                name: String::new(),
                ..sample_input()
            })
            .await;

        assert!(matches!(result, Err(ItemError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_item_delegates_to_repository() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_insert()
            .withf(|input| input.name == "lamp")
            .returning(|input| Ok(Item::new(input)));

        let service = ItemService::new(mock_repo);
        let item = service.create_item(sample_input()).await.unwrap();

        assert_eq!(item.name, "lamp");
        assert!(!item.id.is_nil());
    }

    #[tokio::test]
    async fn test_find_item_passes_through_none() {
        let mut mock_repo = MockItemRepository::new();
        let id = Uuid::now_v7();
        mock_repo
            .expect_find_by_id()
            .with(mockall::predicate::eq(id))
            .returning(|_| Ok(None));

        let service = ItemService::new(mock_repo);
        let found = service.find_item(id).await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_items_in_price_range_forwards_sort_flag() {
        let mut mock_repo = MockItemRepository::new();
        let range = PriceRange { min: 20.0, max: 30.0 };
        mock_repo
            .expect_find_by_price_range()
            .with(
                mockall::predicate::eq(range),
                mockall::predicate::eq(true),
            )
            .returning(|_, _| Ok(vec![]));

        let service = ItemService::new(mock_repo);
        let items = service.items_in_price_range(range, true).await.unwrap();

        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_update_item_rejects_empty_name() {
        let mock_repo = MockItemRepository::new();
        let service = ItemService::new(mock_repo);

        let result = service
            .update_item(
                Uuid::now_v7(),
                UpdateItem {
                    name: Some(String::new()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ItemError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_item_propagates_not_found() {
        let mut mock_repo = MockItemRepository::new();
        let id = Uuid::now_v7();
        mock_repo
            .expect_update()
            .returning(|id, _| Err(ItemError::NotFound(id)));

        let service = ItemService::new(mock_repo);
        let result = service.update_item(id, UpdateItem::default()).await;

        assert!(matches!(result, Err(ItemError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_item_propagates_not_found() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_delete()
            .returning(|id| Err(ItemError::NotFound(id)));

        let service = ItemService::new(mock_repo);
        let result = service.delete_item(Uuid::now_v7()).await;

        assert!(matches!(result, Err(ItemError::NotFound(_))));
    }
}
