//! DynamoDB store implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use userbase_core::storage::{
    Item, Key, KeyValueStore, ScanPage, ScanRequest, StoreError, StoreResult, UpdateItemRequest,
};

use super::conversions::{attributes_to_item, attributes_to_key, item_to_attributes, key_to_attributes};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error,
    map_update_item_error,
};

/// Key-value store backed by DynamoDB.
///
/// Every attribute is stored as a string (`S`) attribute.
#[derive(Clone)]
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl KeyValueStore for DynamoDbStore {
    async fn put_item(&self, table: &str, item: Item) -> StoreResult<()> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item_to_attributes(item)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, table))?;

        Ok(())
    }

    async fn get_item(&self, table: &str, key: &Key) -> StoreResult<Option<Item>> {
        let output = self
            .client
            .get_item()
            .table_name(table)
            .key(&key.attribute, AttributeValue::S(key.value.clone()))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, table))?;

        // GetItem on an absent key succeeds without an item.
        output.item.map(attributes_to_item).transpose()
    }

    async fn update_item(&self, table: &str, request: &UpdateItemRequest) -> StoreResult<Item> {
        let values = request
            .values
            .iter()
            .map(|(placeholder, value)| (placeholder.clone(), AttributeValue::S(value.clone())))
            .collect();

        let output = self
            .client
            .update_item()
            .table_name(table)
            .set_key(Some(key_to_attributes(&request.key)))
            .update_expression(&request.update_expression)
            .set_condition_expression(request.condition_expression.clone())
            .set_expression_attribute_values(Some(values))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, table))?;

        let attributes = output
            .attributes
            .ok_or_else(|| StoreError::Decode("UpdateItem returned no attributes".to_string()))?;

        attributes_to_item(attributes)
    }

    async fn delete_item(&self, table: &str, key: &Key) -> StoreResult<()> {
        self.client
            .delete_item()
            .table_name(table)
            .set_key(Some(key_to_attributes(key)))
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, table))?;

        Ok(())
    }

    async fn scan(&self, table: &str, request: &ScanRequest) -> StoreResult<ScanPage> {
        let limit = request
            .limit
            .map(|limit| i32::try_from(limit).unwrap_or(i32::MAX));

        let output = self
            .client
            .scan()
            .table_name(table)
            .set_limit(limit)
            .set_exclusive_start_key(request.exclusive_start_key.as_ref().map(key_to_attributes))
            .send()
            .await
            .map_err(|e| map_scan_error(e, table))?;

        let items = output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(attributes_to_item)
            .collect::<StoreResult<Vec<_>>>()?;

        let last_evaluated_key = output
            .last_evaluated_key
            .filter(|key| !key.is_empty())
            .map(attributes_to_key)
            .transpose()?;

        Ok(ScanPage {
            items,
            last_evaluated_key,
        })
    }
}
