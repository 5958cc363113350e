//! User repository over a generic key-value store.
//!
//! Owns the table name and translates between users and store items. All
//! decisions about "not found" are made here from typed store results.

use std::sync::Arc;

use userbase_core::storage::{
    KeyValueStore, RepositoryError, Result, ScanRequest, StoreError, UpdateItemRequest,
};
use userbase_core::users::{
    build_update_expression, item_to_user, user_key, user_to_item, PageRequest, User, UserPage,
    UserUpdate, EMAIL_ATTR,
};

#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn KeyValueStore>,
    table_name: String,
}

impl UserRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, table_name: impl Into<String>) -> Self {
        Self {
            store,
            table_name: table_name.into(),
        }
    }

    /// Inserts or replaces the user.
    pub async fn create(&self, user: &User) -> Result<()> {
        self.store
            .put_item(&self.table_name, user_to_item(user))
            .await?;

        tracing::debug!(email = %user.email, "User stored");
        Ok(())
    }

    /// Fetches the user with the given email.
    pub async fn get(&self, email: &str) -> Result<User> {
        let item = self
            .store
            .get_item(&self.table_name, &user_key(email))
            .await?
            .ok_or_else(|| RepositoryError::NotFound {
                email: email.to_string(),
            })?;

        item_to_user(&item)
    }

    /// Applies the non-empty fields of `update` to an existing user.
    ///
    /// Returns the full record after the update.
    pub async fn update(&self, update: &UserUpdate) -> Result<User> {
        if !update.has_changes() {
            return Err(RepositoryError::EmptyUpdate);
        }
        let built = build_update_expression(update);

        let request = UpdateItemRequest {
            key: user_key(&update.email),
            update_expression: built.expression,
            condition_expression: Some(format!("attribute_exists({EMAIL_ATTR})")),
            values: built.values,
        };

        let item = self
            .store
            .update_item(&self.table_name, &request)
            .await
            .map_err(|err| match err {
                StoreError::ConditionFailed => RepositoryError::NotFound {
                    email: update.email.clone(),
                },
                other => other.into(),
            })?;

        item_to_user(&item)
    }

    /// Removes the user. Deleting an absent user succeeds.
    pub async fn delete(&self, email: &str) -> Result<()> {
        self.store
            .delete_item(&self.table_name, &user_key(email))
            .await?;
        Ok(())
    }

    /// Returns one page of users.
    pub async fn list(&self, page: &PageRequest) -> Result<UserPage> {
        let request = ScanRequest {
            limit: Some(page.limit),
            exclusive_start_key: page.cursor.as_deref().map(user_key),
        };

        let scanned = self.store.scan(&self.table_name, &request).await?;

        let users = scanned
            .items
            .iter()
            .map(item_to_user)
            .collect::<Result<Vec<_>>>()?;

        Ok(UserPage {
            users,
            next_cursor: scanned.last_evaluated_key.map(|key| key.value),
        })
    }
}

#[cfg(test)]
mod tests {
    use userbase_core::storage::Item;

    use super::*;
    use crate::storage::testing::{FailingStore, FixedItemStore};
    use crate::storage::InMemoryStore;

    const TABLE: &str = "users";

    fn repository() -> UserRepository {
        UserRepository::new(Arc::new(InMemoryStore::with_table(TABLE, EMAIL_ATTR)), TABLE)
    }

    fn ada() -> User {
        User::new("ada@example.com")
            .with_first_name("Ada")
            .with_last_name("Lovelace")
            .with_phone_number("0987654321")
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = repository();
        repo.create(&ada()).await.unwrap();

        assert_eq!(repo.get("ada@example.com").await.unwrap(), ada());
    }

    #[tokio::test]
    async fn test_create_replaces_existing_user() {
        let repo = repository();
        repo.create(&ada()).await.unwrap();
        repo.create(&User::new("ada@example.com").with_first_name("Augusta"))
            .await
            .unwrap();

        let user = repo.get("ada@example.com").await.unwrap();
        assert_eq!(user.first_name, "Augusta");
        assert_eq!(user.last_name, "");
    }

    #[tokio::test]
    async fn test_get_absent_user_is_not_found() {
        let err = repository().get("nobody@example.com").await.unwrap_err();

        assert_eq!(
            err,
            RepositoryError::NotFound {
                email: "nobody@example.com".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_update_preserves_untouched_fields() {
        let repo = repository();
        repo.create(&ada()).await.unwrap();

        let updated = repo
            .update(&UserUpdate::new("ada@example.com").with_last_name("King"))
            .await
            .unwrap();

        assert_eq!(updated.email, "ada@example.com");
        assert_eq!(updated.first_name, "Ada");
        assert_eq!(updated.last_name, "King");
        assert_eq!(updated.phone_number, "0987654321");
        assert_eq!(repo.get("ada@example.com").await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_absent_user_is_not_found() {
        let repo = repository();

        let err = repo
            .update(&UserUpdate::new("nobody@example.com").with_first_name("Nobody"))
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::NotFound { .. }));
        assert!(matches!(
            repo.get("nobody@example.com").await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_without_fields_does_not_touch_the_store() {
        let repo = UserRepository::new(Arc::new(FailingStore::unavailable()), TABLE);

        let err = repo
            .update(&UserUpdate::new("ada@example.com"))
            .await
            .unwrap_err();

        assert_eq!(err, RepositoryError::EmptyUpdate);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = repository();
        repo.create(&ada()).await.unwrap();

        repo.delete("ada@example.com").await.unwrap();
        repo.delete("ada@example.com").await.unwrap();

        assert!(matches!(
            repo.get("ada@example.com").await,
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_walks_every_page() {
        let repo = repository();
        for i in 0..7 {
            repo.create(&User::new(format!("user{i}@example.com")))
                .await
                .unwrap();
        }

        let mut page = PageRequest {
            limit: 3,
            cursor: None,
        };
        let mut emails = Vec::new();
        let mut pages = 0;
        loop {
            let result = repo.list(&page).await.unwrap();
            pages += 1;
            emails.extend(result.users.into_iter().map(|u| u.email));
            match result.next_cursor {
                Some(cursor) => page.cursor = Some(cursor),
                None => break,
            }
        }

        assert_eq!(pages, 3);
        assert_eq!(emails.len(), 7);
        assert_eq!(emails[0], "user0@example.com");
        assert_eq!(emails[6], "user6@example.com");
    }

    #[tokio::test]
    async fn test_store_failures_become_store_errors() {
        let repo = UserRepository::new(Arc::new(FailingStore::unavailable()), TABLE);

        assert!(matches!(
            repo.create(&ada()).await,
            Err(RepositoryError::Store(_))
        ));
        assert!(matches!(
            repo.get("ada@example.com").await,
            Err(RepositoryError::Store(_))
        ));
        assert!(matches!(
            repo.update(&UserUpdate::new("ada@example.com").with_first_name("A"))
                .await,
            Err(RepositoryError::Store(_))
        ));
        assert!(matches!(
            repo.delete("ada@example.com").await,
            Err(RepositoryError::Store(_))
        ));
        assert!(matches!(
            repo.list(&PageRequest::default()).await,
            Err(RepositoryError::Store(_))
        ));
    }

    #[tokio::test]
    async fn test_undecodable_item_is_a_decode_error() {
        let item = Item::from([("first_name".to_string(), "Ada".to_string())]);
        let repo = UserRepository::new(Arc::new(FixedItemStore::new(item)), TABLE);

        assert!(matches!(
            repo.get("ada@example.com").await,
            Err(RepositoryError::Decode(_))
        ));
        assert!(matches!(
            repo.update(&UserUpdate::new("ada@example.com").with_first_name("Ada"))
                .await,
            Err(RepositoryError::Decode(_))
        ));
    }
}
