use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::database::manager::DatabaseError;
use crate::database::models::{Movie, NewMovie};
use crate::database::page::Page;
use crate::database::statement::Statement;

/// Storage operations on the `movies` table
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn insert(&self, movie: &NewMovie) -> Result<Option<i64>, DatabaseError>;

    async fn list(&self, page: Page) -> Result<Vec<Movie>, DatabaseError>;

    async fn update(&self, id: i64, movie: &NewMovie) -> Result<u64, DatabaseError>;

    async fn delete(&self, id: i64) -> Result<u64, DatabaseError>;
}

#[derive(Clone, Debug)]
pub struct PgMovieStore {
    pool: PgPool,
}

impl PgMovieStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    #[instrument(name = "movies.insert", skip(self, movie), fields(title = %movie.title))]
    async fn insert(&self, movie: &NewMovie) -> Result<Option<i64>, DatabaseError> {
        let rows = Statement::new(
            "INSERT INTO movies (title, genres, year) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(movie.title.as_str())
        .bind(movie.genres.as_str())
        .bind(movie.year)
        .fetch_rows(&self.pool)
        .await?;

        Ok(rows.first().and_then(|row| row.get("id")).and_then(|id| id.as_i64()))
    }

    #[instrument(name = "movies.list", skip(self))]
    async fn list(&self, page: Page) -> Result<Vec<Movie>, DatabaseError> {
        Statement::new("SELECT id, title, genres, year FROM movies ORDER BY id LIMIT $1 OFFSET $2")
            .bind(page.limit())
            .bind(page.offset())
            .fetch_rows(&self.pool)
            .await?
            .into_iter()
            .map(Movie::try_from)
            .collect()
    }

    #[instrument(name = "movies.update", skip(self, movie))]
    async fn update(&self, id: i64, movie: &NewMovie) -> Result<u64, DatabaseError> {
        Statement::new("UPDATE movies SET title = $1, genres = $2, year = $3 WHERE id = $4")
            .bind(movie.title.as_str())
            .bind(movie.genres.as_str())
            .bind(movie.year)
            .bind(id)
            .execute(&self.pool)
            .await
    }

    #[instrument(name = "movies.delete", skip(self))]
    async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        Statement::new("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
    }
}
