//! API body and query types shared by the service and its clients.
//!
//! Pure data types and validation, no I/O.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{is_valid_email, User};

/// Default number of users per page.
pub const DEFAULT_PAGE_LIMIT: u32 = 25;

/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// JSON body returned on failure.
///
/// `error_msg` is omitted entirely, never `null`, when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
}

impl ErrorBody {
    /// Creates a body carrying the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error_msg: Some(message.into()),
        }
    }
}

/// Query string accepted by the user listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Errors raised while validating page parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("Page limit must be between 1 and {MAX_PAGE_LIMIT}, got {0}")]
    LimitOutOfRange(u32),
    #[error("Page cursor is not a valid email: {0}")]
    InvalidCursor(String),
}

/// A validated request for one page of users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    /// Email of the last user of the previous page.
    pub cursor: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            cursor: None,
        }
    }
}

impl PageRequest {
    /// Validates a listing query.
    ///
    /// A missing limit falls back to [`DEFAULT_PAGE_LIMIT`]; an empty cursor
    /// is treated as no cursor.
    pub fn from_query(query: ListUsersQuery) -> Result<Self, PageError> {
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if limit == 0 || limit > MAX_PAGE_LIMIT {
            return Err(PageError::LimitOutOfRange(limit));
        }

        let cursor = query.cursor.filter(|c| !c.is_empty());
        if let Some(cursor) = &cursor {
            if !is_valid_email(cursor) {
                return Err(PageError::InvalidCursor(cursor.clone()));
            }
        }

        Ok(Self { limit, cursor })
    }
}

/// One page of users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPage {
    pub users: Vec<User>,
    /// Pass back as `cursor` to fetch the next page; absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_omits_absent_message() {
        let json = serde_json::to_string(&ErrorBody::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_error_body_with_message() {
        let json = serde_json::to_string(&ErrorBody::new("user not found")).unwrap();
        assert_eq!(json, r#"{"error_msg":"user not found"}"#);
    }

    #[test]
    fn test_page_request_defaults() {
        let page = PageRequest::from_query(ListUsersQuery::default()).unwrap();
        assert_eq!(page, PageRequest::default());
        assert_eq!(page.limit, DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn test_page_request_limit_bounds() {
        let query = |limit| ListUsersQuery {
            limit: Some(limit),
            cursor: None,
        };

        assert_eq!(
            PageRequest::from_query(query(0)),
            Err(PageError::LimitOutOfRange(0))
        );
        assert_eq!(
            PageRequest::from_query(query(MAX_PAGE_LIMIT + 1)),
            Err(PageError::LimitOutOfRange(MAX_PAGE_LIMIT + 1))
        );
        assert_eq!(PageRequest::from_query(query(1)).unwrap().limit, 1);
        assert_eq!(
            PageRequest::from_query(query(MAX_PAGE_LIMIT)).unwrap().limit,
            MAX_PAGE_LIMIT
        );
    }

    #[test]
    fn test_page_request_cursor() {
        let page = PageRequest::from_query(ListUsersQuery {
            limit: None,
            cursor: Some("ada@example.com".to_string()),
        })
        .unwrap();
        assert_eq!(page.cursor.as_deref(), Some("ada@example.com"));

        let page = PageRequest::from_query(ListUsersQuery {
            limit: None,
            cursor: Some(String::new()),
        })
        .unwrap();
        assert!(page.cursor.is_none());

        assert_eq!(
            PageRequest::from_query(ListUsersQuery {
                limit: None,
                cursor: Some("nope".to_string()),
            }),
            Err(PageError::InvalidCursor("nope".to_string()))
        );
    }

    #[test]
    fn test_user_page_omits_missing_cursor() {
        let json = serde_json::to_value(UserPage::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "users": [] }));
    }
}
