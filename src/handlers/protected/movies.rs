// handlers/protected/movies.rs - GET /movies handler

use axum::extract::{rejection::QueryRejection, Query, State};
use tracing::instrument;

use crate::database::models::Movie;
use crate::handlers::utils::{page_from_query, PageQuery};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /movies?page=N - one page of movies ordered by id
#[instrument(name = "GET /movies", skip_all, fields(caller = %caller.email))]
pub async fn movies_get(
    caller: AuthUser,
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Vec<Movie>> {
    let page = page_from_query(query)?;
    let movies = state.movies.list(page).await?;
    Ok(ApiResponse::success(movies))
}
