mod error;
mod http_mapping;
mod traits;
mod types;

pub use error::{RepositoryError, Result, StoreError, StoreResult};
pub use http_mapping::repository_error_to_status_code;
pub use traits::KeyValueStore;
pub use types::{Item, Key, ScanPage, ScanRequest, UpdateItemRequest};
