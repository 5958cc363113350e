//! In-memory storage backend.
//!
//! Stores every table in a `BTreeMap` wrapped in `Arc<RwLock<_>>`. Data is
//! lost when the store is dropped. Used by the tests and by local runs built
//! with the `inmemory` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use userbase::storage::inmemory::InMemoryStore;
//!
//! let store = InMemoryStore::with_table("users", "email");
//! // Use store for testing...
//! ```

mod expression;
mod store;

pub use store::InMemoryStore;
