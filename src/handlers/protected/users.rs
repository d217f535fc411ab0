// handlers/protected/users.rs - GET /users handler

use axum::extract::{rejection::QueryRejection, Query, State};
use tracing::instrument;

use crate::database::models::User;
use crate::handlers::utils::{page_from_query, PageQuery};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /users?page=N - one page of users ordered by id
#[instrument(name = "GET /users", skip_all, fields(caller = %caller.email))]
pub async fn users_get(
    caller: AuthUser,
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Vec<User>> {
    let page = page_from_query(query)?;
    let users = state.users.list(page).await?;
    Ok(ApiResponse::success(users))
}
