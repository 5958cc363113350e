use thiserror::Error;

/// Errors reported by a [`KeyValueStore`](super::KeyValueStore) implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Conditional check failed")]
    ConditionFailed,
    #[error("Invalid store request: {0}")]
    Validation(String),
    #[error("Store request failed: {0}")]
    Service(String),
    #[error("Malformed item: {0}")]
    Decode(String),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during user repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("user not found")]
    NotFound { email: String },
    #[error("no user fields to update")]
    EmptyUpdate,
    #[error("Store error: {0}")]
    Store(String),
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Decode(msg) => RepositoryError::Decode(msg),
            other => RepositoryError::Store(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_is_the_public_message() {
        let error = RepositoryError::NotFound {
            email: "ada@example.com".to_string(),
        };
        assert_eq!(error.to_string(), "user not found");
    }

    #[test]
    fn test_empty_update_display() {
        assert_eq!(
            RepositoryError::EmptyUpdate.to_string(),
            "no user fields to update"
        );
    }

    #[test]
    fn test_store_error_display() {
        let error = StoreError::Service("throughput exceeded".to_string());
        assert_eq!(error.to_string(), "Store request failed: throughput exceeded");
    }

    #[test]
    fn test_store_decode_becomes_repository_decode() {
        let error: RepositoryError = StoreError::Decode("email is not a string".to_string()).into();
        assert_eq!(
            error,
            RepositoryError::Decode("email is not a string".to_string())
        );
    }

    #[test]
    fn test_other_store_errors_become_repository_store() {
        let error: RepositoryError = StoreError::ConditionFailed.into();
        assert_eq!(
            error,
            RepositoryError::Store("Conditional check failed".to_string())
        );

        let error: RepositoryError = StoreError::Validation("empty key".to_string()).into();
        assert_eq!(
            error,
            RepositoryError::Store("Invalid store request: empty key".to_string())
        );
    }
}
