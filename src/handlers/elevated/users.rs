// handlers/elevated/users.rs - PUT|DELETE /users/:id handlers

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use tracing::instrument;

use crate::error::ApiError;
use crate::handlers::public::UserRequest;
use crate::handlers::utils::{json_body, path_id, MessageResponse};
use crate::middleware::{AdminUser, ApiResponse, ApiResult};
use crate::state::AppState;

/// PUT /users/:id - replace every field of a user
///
/// All four fields are required; the password is re-hashed. An id with no
/// row answers 404.
#[instrument(name = "PUT /users/:id", skip_all, fields(admin = %admin.0.email))]
pub async fn user_put(
    admin: AdminUser,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let id = path_id(id)?;
    let user = json_body(payload)?.into_new_user().await?;

    if state.users.update(id, &user).await? == 0 {
        return Err(ApiError::not_found(format!("User {} not found", id)));
    }

    tracing::info!(user_id = id, "User updated");
    Ok(ApiResponse::success(MessageResponse { message: "User updated." }))
}

/// DELETE /users/:id - remove a user
#[instrument(name = "DELETE /users/:id", skip_all, fields(admin = %admin.0.email))]
pub async fn user_delete(
    admin: AdminUser,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let id = path_id(id)?;

    if state.users.delete(id).await? == 0 {
        return Err(ApiError::not_found(format!("User {} not found", id)));
    }

    tracing::info!(user_id = id, "User deleted");
    Ok(ApiResponse::no_content())
}
