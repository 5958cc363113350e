use async_trait::async_trait;

use super::{Item, Key, ScanPage, ScanRequest, StoreResult, UpdateItemRequest};

/// Capability interface over a managed key-value store.
///
/// Exposes exactly the five primitives the service needs. Every call is
/// addressed by table name so a single client can serve several tables.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Writes the item, replacing any item with the same key.
    async fn put_item(&self, table: &str, item: Item) -> StoreResult<()>;

    /// Reads one item. `Ok(None)` is the store's signal that the key is absent.
    async fn get_item(&self, table: &str, key: &Key) -> StoreResult<Option<Item>>;

    /// Applies a partial update and returns every attribute of the updated item.
    ///
    /// Fails with [`StoreError::ConditionFailed`](super::StoreError::ConditionFailed)
    /// when the request's condition expression does not hold.
    async fn update_item(&self, table: &str, request: &UpdateItemRequest) -> StoreResult<Item>;

    /// Removes one item. Removing an absent key is not an error.
    async fn delete_item(&self, table: &str, key: &Key) -> StoreResult<()>;

    /// Reads one page of the table.
    async fn scan(&self, table: &str, request: &ScanRequest) -> StoreResult<ScanPage>;
}
