//! Store doubles for exercising error paths.

use async_trait::async_trait;

use userbase_core::storage::{
    Item, Key, KeyValueStore, ScanPage, ScanRequest, StoreError, StoreResult, UpdateItemRequest,
};

/// A store whose every call fails with the same error.
#[derive(Debug, Clone)]
pub struct FailingStore {
    error: StoreError,
}

impl FailingStore {
    pub fn new(error: StoreError) -> Self {
        Self { error }
    }

    /// Fails every call with a generic service error.
    pub fn unavailable() -> Self {
        Self::new(StoreError::Service("connection reset by peer".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn put_item(&self, _table: &str, _item: Item) -> StoreResult<()> {
        Err(self.error.clone())
    }

    async fn get_item(&self, _table: &str, _key: &Key) -> StoreResult<Option<Item>> {
        Err(self.error.clone())
    }

    async fn update_item(&self, _table: &str, _request: &UpdateItemRequest) -> StoreResult<Item> {
        Err(self.error.clone())
    }

    async fn delete_item(&self, _table: &str, _key: &Key) -> StoreResult<()> {
        Err(self.error.clone())
    }

    async fn scan(&self, _table: &str, _request: &ScanRequest) -> StoreResult<ScanPage> {
        Err(self.error.clone())
    }
}

/// A store that answers every read with the same item.
#[derive(Debug, Clone)]
pub struct FixedItemStore {
    item: Item,
}

impl FixedItemStore {
    pub fn new(item: Item) -> Self {
        Self { item }
    }
}

#[async_trait]
impl KeyValueStore for FixedItemStore {
    async fn put_item(&self, _table: &str, _item: Item) -> StoreResult<()> {
        Ok(())
    }

    async fn get_item(&self, _table: &str, _key: &Key) -> StoreResult<Option<Item>> {
        Ok(Some(self.item.clone()))
    }

    async fn update_item(&self, _table: &str, _request: &UpdateItemRequest) -> StoreResult<Item> {
        Ok(self.item.clone())
    }

    async fn delete_item(&self, _table: &str, _key: &Key) -> StoreResult<()> {
        Ok(())
    }

    async fn scan(&self, _table: &str, _request: &ScanRequest) -> StoreResult<ScanPage> {
        Ok(ScanPage {
            items: vec![self.item.clone()],
            last_evaluated_key: None,
        })
    }
}
