use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use userbase_core::storage::{repository_error_to_status_code, RepositoryError};
use userbase_core::users::ErrorBody;

pub const CREATE_FAILED: &str = "there was an error while creating the user";
pub const GET_FAILED: &str = "there was an error while getting the user";
pub const UPDATE_FAILED: &str = "there was an error while updating the user";
pub const DELETE_FAILED: &str = "there was an error while deleting the user";
pub const LIST_FAILED: &str = "there was an error while listing the users";

/// Errors returned by the request handlers.
///
/// The `Display` text of each variant is the `error_msg` sent to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("the user format is invalid")]
    InvalidUserFormat,
    #[error("the email format is invalid")]
    InvalidEmail,
    #[error("the page parameters are invalid")]
    InvalidPage,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("the request timed out")]
    Timeout,
    #[error("{message}")]
    Repository {
        message: &'static str,
        source: RepositoryError,
    },
}

impl ApiError {
    /// Wraps a repository error, exposing `failure` unless the error has a
    /// public message of its own.
    pub fn repository(source: RepositoryError, failure: &'static str) -> Self {
        let message = match &source {
            RepositoryError::NotFound { .. } => "user not found",
            RepositoryError::EmptyUpdate => "there are no user fields to update",
            RepositoryError::Store(_) | RepositoryError::Decode(_) => failure,
        };
        Self::Repository { message, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUserFormat | Self::InvalidEmail | Self::InvalidPage => {
                StatusCode::BAD_REQUEST
            }
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Repository { source, .. } => {
                StatusCode::from_u16(repository_error_to_status_code(source))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            Self::Repository { source, message } if status.is_server_error() => {
                tracing::error!(error = %source, "{message}");
            }
            _ => tracing::warn!(status = %status, message = %self, "API error"),
        }

        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_keeps_its_public_message() {
        let err = ApiError::repository(
            RepositoryError::NotFound {
                email: "ada@example.com".to_string(),
            },
            GET_FAILED,
        );

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "user not found");
    }

    #[test]
    fn test_store_error_detail_is_hidden() {
        let err = ApiError::repository(
            RepositoryError::Store("connection reset by peer".to_string()),
            DELETE_FAILED,
        );

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), DELETE_FAILED);
    }

    #[test]
    fn test_empty_update_is_a_bad_request() {
        let err = ApiError::repository(RepositoryError::EmptyUpdate, UPDATE_FAILED);

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "there are no user fields to update");
    }

    #[test]
    fn test_validation_errors_are_bad_requests() {
        for err in [
            ApiError::InvalidUserFormat,
            ApiError::InvalidEmail,
            ApiError::InvalidPage,
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }
}
