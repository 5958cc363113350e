//! Application state shared by all request handlers.

use std::sync::Arc;

use userbase_core::storage::KeyValueStore;

use crate::repository::UserRepository;

/// Shared application state.
///
/// Cloned for each request; the store handle behind the repository is
/// created once at startup.
#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
}

impl AppState {
    pub fn new(store: Arc<dyn KeyValueStore>, table_name: impl Into<String>) -> Self {
        Self {
            users: UserRepository::new(store, table_name),
        }
    }
}
