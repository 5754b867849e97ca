//! User handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};

use common::{AppError, AppResult};
use domain::{UpdateAction, UpdateRoles, UpdateStatus, UserInput, UserResponse, UserSummary};

use crate::api::extractors::{JsonBody, UserIdPath};
use crate::api::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/summary", get(get_summary))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/roles", put(update_roles))
        .route("/:id/status", put(update_status))
        .route("/:id/action", put(update_action))
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.get_all_users().await?;
    Ok(Json(users))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Malformed body or validation error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UserInput>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service.add_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Aggregate role and status counts
#[utoipa::path(
    get,
    path = "/users/summary",
    tag = "Users",
    responses(
        (status = 200, description = "User summary", body = UserSummary)
    )
)]
pub async fn get_summary(State(state): State<AppState>) -> AppResult<Json<UserSummary>> {
    let summary = state.user_service.get_summary().await?;
    Ok(Json(summary))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .get_user_by_id(id)
        .await?
        .ok_or(AppError::NotFound(id))?;

    Ok(Json(user))
}

/// Update name, email and roles of a user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UserInput,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Malformed body or validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    JsonBody(payload): JsonBody<UserInput>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.update_user(payload.with_id(id)).await?;
    Ok(Json(user))
}

/// Delete a user permanently
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Non-positive user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> AppResult<StatusCode> {
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace the role set of a user
#[utoipa::path(
    put,
    path = "/users/{id}/roles",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateRoles,
    responses(
        (status = 204, description = "Roles replaced"),
        (status = 400, description = "Empty role list or unknown role"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_roles(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    JsonBody(mut payload): JsonBody<UpdateRoles>,
) -> AppResult<StatusCode> {
    payload.id = id;
    state.user_service.update_user_role(payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Set the lifecycle status of a user
#[utoipa::path(
    put,
    path = "/users/{id}/status",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateStatus,
    responses(
        (status = 204, description = "Status updated"),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    JsonBody(mut payload): JsonBody<UpdateStatus>,
) -> AppResult<StatusCode> {
    payload.id = id;
    state.user_service.update_user_status(payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Set the pending administrative action of a user
#[utoipa::path(
    put,
    path = "/users/{id}/action",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateAction,
    responses(
        (status = 204, description = "Action updated"),
        (status = 400, description = "Unknown action or non-positive user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_action(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    JsonBody(mut payload): JsonBody<UpdateAction>,
) -> AppResult<StatusCode> {
    payload.id = id;
    state.user_service.update_user_action(payload).await?;
    Ok(StatusCode::NO_CONTENT)
}
