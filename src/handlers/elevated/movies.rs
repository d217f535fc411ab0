// handlers/elevated/movies.rs - POST /movies, PUT|DELETE /movies/:id handlers

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::database::models::NewMovie;
use crate::error::ApiError;
use crate::handlers::utils::{json_body, path_id, MessageResponse, Presence};
use crate::middleware::{AdminUser, ApiResponse, ApiResult};
use crate::state::AppState;

/// `genres` arrives either as one string or as a list of names
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Genres {
    One(String),
    Many(Vec<String>),
}

impl Genres {
    /// Stored form: names trimmed and comma-joined
    fn normalize(self) -> String {
        match self {
            Genres::One(s) => s.trim().to_string(),
            Genres::Many(list) => list
                .iter()
                .map(|g| g.trim())
                .filter(|g| !g.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MovieRequest {
    pub title: Option<String>,
    pub genres: Option<Genres>,
    pub year: Option<i32>,
}

impl MovieRequest {
    fn into_new_movie(self) -> Result<NewMovie, ApiError> {
        let mut presence = Presence::default();
        let title = presence.text("title", self.title);
        let genres = presence.text("genres", self.genres.map(Genres::normalize));
        let year = presence.number("year", self.year);
        presence.finish()?;

        Ok(NewMovie { title, genres, year })
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedMovieResponse {
    pub message: &'static str,
    #[serde(rename = "movieId")]
    pub movie_id: i64,
}

/// POST /movies - insert a movie
#[instrument(name = "POST /movies", skip_all, fields(admin = %admin.0.email))]
pub async fn movie_post(
    admin: AdminUser,
    State(state): State<AppState>,
    payload: Result<Json<MovieRequest>, JsonRejection>,
) -> ApiResult<CreatedMovieResponse> {
    let movie = json_body(payload)?.into_new_movie()?;

    let movie_id = state.movies.insert(&movie).await?.ok_or_else(|| {
        tracing::error!("Insert into movies returned no id");
        ApiError::storage("Movie was not created, no id was returned")
    })?;

    tracing::info!(movie_id, "Movie created");
    Ok(ApiResponse::created(CreatedMovieResponse {
        message: "Movie created.",
        movie_id,
    }))
}

/// PUT /movies/:id - replace title, genres and year
#[instrument(name = "PUT /movies/:id", skip_all, fields(admin = %admin.0.email))]
pub async fn movie_put(
    admin: AdminUser,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<MovieRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let id = path_id(id)?;
    let movie = json_body(payload)?.into_new_movie()?;

    if state.movies.update(id, &movie).await? == 0 {
        return Err(ApiError::not_found(format!("Movie {} not found", id)));
    }

    tracing::info!(movie_id = id, "Movie updated");
    Ok(ApiResponse::success(MessageResponse { message: "Movie updated." }))
}

/// DELETE /movies/:id - remove a movie
#[instrument(name = "DELETE /movies/:id", skip_all, fields(admin = %admin.0.email))]
pub async fn movie_delete(
    admin: AdminUser,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let id = path_id(id)?;

    if state.movies.delete(id).await? == 0 {
        return Err(ApiError::not_found(format!("Movie {} not found", id)));
    }

    tracing::info!(movie_id = id, "Movie deleted");
    Ok(ApiResponse::no_content())
}
