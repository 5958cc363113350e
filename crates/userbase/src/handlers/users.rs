//! User CRUD handlers.
//!
//! Bodies are decoded from raw bytes so callers need not send a
//! `Content-Type` header, matching what API Gateway proxies forward.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};

use userbase_core::users::{
    is_valid_email, ListUsersQuery, PageRequest, User, UserPage, UserUpdate,
};

use super::error::{CREATE_FAILED, DELETE_FAILED, GET_FAILED, LIST_FAILED, UPDATE_FAILED};
use crate::{handlers::ApiError, state::AppState};

/// Query parameters addressing a single user.
#[derive(Debug, Default, Deserialize)]
pub struct EmailQuery {
    #[serde(default)]
    pub email: String,
}

/// Extracts a valid email from the query string.
fn email_from_query(query: Result<Query<EmailQuery>, QueryRejection>) -> Result<String, ApiError> {
    let Query(EmailQuery { email }) = query.map_err(|_| ApiError::InvalidEmail)?;
    if !is_valid_email(&email) {
        return Err(ApiError::InvalidEmail);
    }
    Ok(email)
}

/// Decodes a JSON object body, mapping any failure to `InvalidUserFormat`.
fn decode_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|err| {
        tracing::debug!(error = %err, "Failed to parse user body");
        ApiError::InvalidUserFormat
    })?;

    // Structs would otherwise also accept JSON arrays.
    if !value.is_object() {
        return Err(ApiError::InvalidUserFormat);
    }

    serde_json::from_value(value).map_err(|err| {
        tracing::debug!(error = %err, "Failed to decode user body");
        ApiError::InvalidUserFormat
    })
}

/// Create or replace a user (POST /users).
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let user: User = decode_body(&body)?;
    if !is_valid_email(&user.email) {
        return Err(ApiError::InvalidEmail);
    }

    state
        .users
        .create(&user)
        .await
        .map_err(|err| ApiError::repository(err, CREATE_FAILED))?;

    tracing::info!(email = %user.email, "Created user");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by email (GET /users?email=...).
pub async fn get_user(
    State(state): State<AppState>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<User>, ApiError> {
    let email = email_from_query(query)?;

    let user = state
        .users
        .get(&email)
        .await
        .map_err(|err| ApiError::repository(err, GET_FAILED))?;

    Ok(Json(user))
}

/// Partially update a user (PUT /users).
///
/// Only non-empty fields are written; the response carries the full record.
pub async fn update_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<User>, ApiError> {
    let update: UserUpdate = decode_body(&body)?;
    if !is_valid_email(&update.email) {
        return Err(ApiError::InvalidEmail);
    }

    let user = state
        .users
        .update(&update)
        .await
        .map_err(|err| ApiError::repository(err, UPDATE_FAILED))?;

    tracing::info!(email = %user.email, "Updated user");
    Ok(Json(user))
}

/// Delete a user (DELETE /users?email=...).
///
/// Succeeds whether or not the user existed.
pub async fn delete_user(
    State(state): State<AppState>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let email = email_from_query(query)?;

    state
        .users
        .delete(&email)
        .await
        .map_err(|err| ApiError::repository(err, DELETE_FAILED))?;

    tracing::info!(email = %email, "Deleted user");
    Ok(StatusCode::NO_CONTENT)
}

/// List one page of users (GET /users/list?limit=..&cursor=..).
pub async fn list_users(
    State(state): State<AppState>,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> Result<Json<UserPage>, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::InvalidPage)?;
    let page = PageRequest::from_query(query).map_err(|err| {
        tracing::debug!(error = %err, "Rejected page parameters");
        ApiError::InvalidPage
    })?;

    let users = state
        .users
        .list(&page)
        .await
        .map_err(|err| ApiError::repository(err, LIST_FAILED))?;

    Ok(Json(users))
}

/// Fallback for verbs the users resource does not support.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
