//! Pure functions for mapping repository errors to HTTP status codes.
//!
//! Follows the Functional Core pattern: no side effects, no framework types.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `EmptyUpdate` -> 400 (Bad Request)
/// - `Store` -> 500 (Internal Server Error)
/// - `Decode` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use userbase_core::storage::{repository_error_to_status_code, RepositoryError};
///
/// let error = RepositoryError::NotFound {
///     email: "ada@example.com".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::EmptyUpdate => 400,
        RepositoryError::Store(_) => 500,
        RepositoryError::Decode(_) => 500,
    }
}
