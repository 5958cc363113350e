use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::livez,
        users::{create_user, delete_user, get_user, list_users, method_not_allowed, update_user},
        ApiError,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
///
/// The users resource is dispatched by verb alone and answers on every path
/// not claimed by another route, so it works behind any gateway resource or
/// stage prefix. `HEAD` is answered explicitly since axum would otherwise
/// run the `GET` handler for it.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let users: MethodRouter = get(get_user)
        .head(method_not_allowed)
        .post(create_user)
        .put(update_user)
        .delete(delete_user)
        .fallback(method_not_allowed)
        .with_state(state.clone());

    let list: MethodRouter<AppState> = get(list_users)
        .head(method_not_allowed)
        .fallback(method_not_allowed);
    let health: MethodRouter<AppState> = get(livez)
        .head(method_not_allowed)
        .fallback(method_not_allowed);

    Router::new()
        // REST API stages prefix the path with the stage name.
        .route("/users/list", list.clone())
        .route("/{stage}/users/list", list)
        .route("/livez", health.clone())
        .route("/{stage}/livez", health)
        .fallback_service(users)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .layer(middleware::map_response(finalize_response))
        .with_state(state)
}

/// Labels every response as JSON and gives timeouts the error body shape.
async fn finalize_response(mut response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ApiError::Timeout.into_response();
    }

    response
        .headers_mut()
        .entry(header::CONTENT_TYPE)
        .or_insert(HeaderValue::from_static("application/json"));
    response
}
