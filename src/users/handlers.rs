use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{any, delete, get, post, put},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{
            DeleteUserRequest, GetUserResponse, GetUsersResponse, MessageResponse, UserIdResponse,
            UserPayload,
        },
        extractors::JsonBody,
        repo::RepoError,
        services::validate_user,
    },
};

/// Method and path of every route, logged at startup.
pub const ENDPOINTS: [(&str, &str); 6] = [
    ("GET", "/health"),
    ("GET", "/get-user"),
    ("GET", "/get-users"),
    ("POST", "/create-user"),
    ("PUT", "/update-user"),
    ("DELETE", "/delete-user"),
];

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/health", any(health))
        .route("/get-user", get(get_user).fallback(use_get))
        .route("/get-users", get(get_users).fallback(use_get))
        .route("/create-user", post(create_user).fallback(use_post))
        // update and delete answer a wrong method with 400, not 405
        .route("/update-user", put(update_user).fallback(use_put))
        .route("/delete-user", delete(delete_user).fallback(use_delete))
}

async fn use_get() -> ApiError {
    ApiError::MethodNotAllowed("Method not allowed. Use GET".into())
}

async fn use_post() -> ApiError {
    ApiError::MethodNotAllowed("Method not allowed. Use POST".into())
}

async fn use_put() -> ApiError {
    ApiError::bad_request("Method not allowed. Use PUT")
}

async fn use_delete() -> ApiError {
    ApiError::bad_request("Method not allowed. Use DELETE")
}

/// Logs the underlying failure and hides it from the client.
/// A missing row keeps the same status as a storage failure.
fn repo_failure(e: RepoError, message: &str) -> ApiError {
    match e {
        RepoError::NotFound(id) => {
            warn!(user_id = id, "user not found");
            ApiError::internal("User not found")
        }
        RepoError::Storage(e) => {
            error!(error = %e, "{}", message);
            ApiError::internal(message)
        }
    }
}

fn rejected(e: impl Into<ApiError> + std::fmt::Display) -> ApiError {
    warn!(reason = %e, "invalid user payload");
    e.into()
}

pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse::ok("Server is healthy"))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<GetUserResponse>, ApiError> {
    let raw = params
        .get("id")
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request("User ID is required"))?;
    let id = raw.parse::<i64>().map_err(|_| {
        warn!(id = %raw, "invalid user id");
        ApiError::bad_request("Invalid user ID")
    })?;

    let user = state
        .users
        .get_by_id(id)
        .await
        .map_err(|e| repo_failure(e, "Failed to get user"))?;

    Ok(Json(GetUserResponse {
        success: true,
        message: "User retrieved successfully".into(),
        user: vec![user],
    }))
}

#[instrument(skip(state))]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<GetUsersResponse>, ApiError> {
    let users = state
        .users
        .get_all()
        .await
        .map_err(|e| repo_failure(e, "Failed to get users"))?;

    Ok(Json(GetUsersResponse {
        success: true,
        message: "Users retrieved successfully".into(),
        count: users.len(),
        users,
    }))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UserPayload>,
) -> Result<(StatusCode, Json<UserIdResponse>), ApiError> {
    let fields = validate_user(payload).map_err(rejected)?;

    let user_id = state
        .users
        .create(&fields)
        .await
        .map_err(|e| repo_failure(e, "Failed to create user"))?;

    info!(user_id, name = %fields.name, "user created");
    Ok((
        StatusCode::CREATED,
        Json(UserIdResponse {
            success: true,
            message: "User created successfully".into(),
            user_id,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UserPayload>,
) -> Result<Json<UserIdResponse>, ApiError> {
    let id = payload.id;
    if id == 0 {
        return Err(ApiError::bad_request("User ID is required"));
    }
    let fields = validate_user(payload).map_err(rejected)?;

    let user_id = state
        .users
        .update(id, &fields)
        .await
        .map_err(|e| repo_failure(e, "Failed to update user"))?;

    info!(user_id, name = %fields.name, "user updated");
    Ok(Json(UserIdResponse {
        success: true,
        message: "User updated successfully".into(),
        user_id,
    }))
}

#[instrument(skip(state, body))]
pub async fn delete_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DeleteUserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if body.id == 0 {
        return Err(ApiError::bad_request("User ID is required"));
    }

    state
        .users
        .delete(body.id)
        .await
        .map_err(|e| repo_failure(e, "Failed to delete user"))?;

    info!(user_id = body.id, "user deleted");
    Ok(Json(MessageResponse::ok(format!(
        "User deleted successfully. ID: {}",
        body.id
    ))))
}
