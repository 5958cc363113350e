//! In-memory key-value store implementation.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use userbase_core::storage::{
    Item, Key, KeyValueStore, ScanPage, ScanRequest, StoreError, StoreResult, UpdateItemRequest,
};

use super::expression::{parse_condition, parse_set_clause};

/// One table: its partition key attribute and items ordered by key value.
#[derive(Debug, Default)]
struct Table {
    key_attribute: String,
    items: BTreeMap<String, Item>,
}

impl Table {
    fn check_key(&self, key: &Key) -> StoreResult<()> {
        if key.attribute != self.key_attribute {
            return Err(StoreError::Validation(format!(
                "Key attribute {} does not match the table key {}",
                key.attribute, self.key_attribute
            )));
        }
        if key.value.is_empty() {
            return Err(StoreError::Validation(
                "Key value must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// In-memory store for tests and local development.
///
/// Behaves like a single-partition-key DynamoDB table: puts replace, reads of
/// absent keys return `None`, deletes of absent keys succeed and operations
/// on undeclared tables fail with a service error.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl InMemoryStore {
    /// Creates a store with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one empty table.
    pub fn with_table(table: impl Into<String>, key_attribute: impl Into<String>) -> Self {
        let tables = HashMap::from([(
            table.into(),
            Table {
                key_attribute: key_attribute.into(),
                items: BTreeMap::new(),
            },
        )]);
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// Number of items currently stored in `table`.
    #[cfg(test)]
    pub async fn len(&self, table: &str) -> usize {
        self.tables
            .read()
            .await
            .get(table)
            .map_or(0, |t| t.items.len())
    }
}

fn table_not_found(table: &str) -> StoreError {
    StoreError::Service(format!("Table not found: {table}"))
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn put_item(&self, table: &str, item: Item) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let table = tables.get_mut(table).ok_or_else(|| table_not_found(table))?;

        let value = item.get(&table.key_attribute).cloned().ok_or_else(|| {
            StoreError::Validation(format!(
                "Item is missing the key attribute {}",
                table.key_attribute
            ))
        })?;
        table.check_key(&Key::new(table.key_attribute.clone(), value.clone()))?;

        table.items.insert(value, item);
        Ok(())
    }

    async fn get_item(&self, table: &str, key: &Key) -> StoreResult<Option<Item>> {
        let tables = self.tables.read().await;
        let table = tables.get(table).ok_or_else(|| table_not_found(table))?;
        table.check_key(key)?;

        Ok(table.items.get(&key.value).cloned())
    }

    async fn update_item(&self, table: &str, request: &UpdateItemRequest) -> StoreResult<Item> {
        let assignments = parse_set_clause(&request.update_expression)?;
        let condition = request
            .condition_expression
            .as_deref()
            .map(parse_condition)
            .transpose()?;

        for assignment in &assignments {
            if !request.values.contains_key(&assignment.placeholder) {
                return Err(StoreError::Validation(format!(
                    "Unbound placeholder: {}",
                    assignment.placeholder
                )));
            }
        }
        for placeholder in request.values.keys() {
            if !assignments.iter().any(|a| &a.placeholder == placeholder) {
                return Err(StoreError::Validation(format!(
                    "Value provided for unused placeholder: {placeholder}"
                )));
            }
        }

        let mut tables = self.tables.write().await;
        let table = tables.get_mut(table).ok_or_else(|| table_not_found(table))?;
        table.check_key(&request.key)?;

        if assignments
            .iter()
            .any(|a| a.attribute == table.key_attribute)
        {
            return Err(StoreError::Validation(
                "Cannot update the key attribute".to_string(),
            ));
        }

        let existing = table.items.get(&request.key.value);
        if let Some(condition) = &condition {
            if !condition.holds(existing) {
                return Err(StoreError::ConditionFailed);
            }
        }

        let key = &request.key;
        let item = table
            .items
            .entry(key.value.clone())
            .or_insert_with(|| Item::from([(key.attribute.clone(), key.value.clone())]));
        for assignment in assignments {
            // Placeholders were checked above.
            if let Some(value) = request.values.get(&assignment.placeholder) {
                item.insert(assignment.attribute, value.clone());
            }
        }

        Ok(item.clone())
    }

    async fn delete_item(&self, table: &str, key: &Key) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let table = tables.get_mut(table).ok_or_else(|| table_not_found(table))?;
        table.check_key(key)?;

        table.items.remove(&key.value);
        Ok(())
    }

    async fn scan(&self, table: &str, request: &ScanRequest) -> StoreResult<ScanPage> {
        let tables = self.tables.read().await;
        let table = tables.get(table).ok_or_else(|| table_not_found(table))?;

        let lower = match &request.exclusive_start_key {
            Some(key) => {
                table.check_key(key)?;
                Bound::Excluded(key.value.clone())
            }
            None => Bound::Unbounded,
        };
        let limit = request.limit.map_or(usize::MAX, |l| l as usize);

        let mut remaining = table.items.range((lower, Bound::Unbounded));
        let items: Vec<Item> = remaining
            .by_ref()
            .take(limit)
            .map(|(_, item)| item.clone())
            .collect();

        // Only hand out a cursor when another page exists.
        let last_evaluated_key = match (remaining.next(), items.last()) {
            (Some(_), Some(last)) => last
                .get(&table.key_attribute)
                .map(|value| Key::new(table.key_attribute.clone(), value.clone())),
            _ => None,
        };

        Ok(ScanPage {
            items,
            last_evaluated_key,
        })
    }
}
