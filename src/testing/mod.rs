//! In-memory stores and helpers for driving the router without Postgres.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::auth::{hash_password, TokenKeys};
use crate::database::models::{Movie, NewMovie, NewUser, User};
use crate::database::{DatabaseError, MovieStore, Page, UserStore};
use crate::state::AppState;

pub const TEST_SECRET: &str = "router-test-secret";

#[derive(Default)]
pub struct MemoryUserStore {
    rows: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub async fn count(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn get(&self, id: i64) -> Option<User> {
        self.rows.read().await.iter().find(|u| u.id == id).cloned()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.rows.read().await.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<Option<i64>, DatabaseError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|u| u.email == user.email) {
            return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
        }
        let id = rows.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        rows.push(User {
            id,
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            gender: user.gender.clone(),
            role: user.role.clone(),
            created_at: None,
        });
        Ok(Some(id))
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, DatabaseError> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by_key(|u| u.id);
        Ok(paginate(rows, page))
    }

    async fn update(&self, id: i64, user: &NewUser) -> Result<u64, DatabaseError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|u| u.email == user.email && u.id != id) {
            return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
        }
        match rows.iter_mut().find(|u| u.id == id) {
            Some(row) => {
                row.email = user.email.clone();
                row.password_hash = user.password_hash.clone();
                row.gender = user.gender.clone();
                row.role = user.role.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|u| u.id != id);
        Ok((before - rows.len()) as u64)
    }
}

#[derive(Default)]
pub struct MemoryMovieStore {
    rows: RwLock<Vec<Movie>>,
}

impl MemoryMovieStore {
    pub async fn count(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn get(&self, id: i64) -> Option<Movie> {
        self.rows.read().await.iter().find(|m| m.id == id).cloned()
    }
}

#[async_trait]
impl MovieStore for MemoryMovieStore {
    async fn insert(&self, movie: &NewMovie) -> Result<Option<i64>, DatabaseError> {
        let mut rows = self.rows.write().await;
        let id = rows.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        rows.push(Movie {
            id,
            title: movie.title.clone(),
            genres: movie.genres.clone(),
            year: movie.year,
        });
        Ok(Some(id))
    }

    async fn list(&self, page: Page) -> Result<Vec<Movie>, DatabaseError> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by_key(|m| m.id);
        Ok(paginate(rows, page))
    }

    async fn update(&self, id: i64, movie: &NewMovie) -> Result<u64, DatabaseError> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|m| m.id == id) {
            Some(row) => {
                row.title = movie.title.clone();
                row.genres = movie.genres.clone();
                row.year = movie.year;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|m| m.id != id);
        Ok((before - rows.len()) as u64)
    }
}

fn paginate<T>(rows: Vec<T>, page: Page) -> Vec<T> {
    rows.into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

/// Stores that fail every call, as an unreachable database would
pub struct UnavailableStore;

#[async_trait]
impl UserStore for UnavailableStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DatabaseError> {
        Err(DatabaseError::PoolExhausted)
    }

    async fn insert(&self, _user: &NewUser) -> Result<Option<i64>, DatabaseError> {
        Err(DatabaseError::PoolExhausted)
    }

    async fn list(&self, _page: Page) -> Result<Vec<User>, DatabaseError> {
        Err(DatabaseError::PoolExhausted)
    }

    async fn update(&self, _id: i64, _user: &NewUser) -> Result<u64, DatabaseError> {
        Err(DatabaseError::PoolExhausted)
    }

    async fn delete(&self, _id: i64) -> Result<u64, DatabaseError> {
        Err(DatabaseError::PoolExhausted)
    }
}

#[async_trait]
impl MovieStore for UnavailableStore {
    async fn insert(&self, _movie: &NewMovie) -> Result<Option<i64>, DatabaseError> {
        Err(DatabaseError::PoolExhausted)
    }

    async fn list(&self, _page: Page) -> Result<Vec<Movie>, DatabaseError> {
        Err(DatabaseError::PoolExhausted)
    }

    async fn update(&self, _id: i64, _movie: &NewMovie) -> Result<u64, DatabaseError> {
        Err(DatabaseError::PoolExhausted)
    }

    async fn delete(&self, _id: i64) -> Result<u64, DatabaseError> {
        Err(DatabaseError::PoolExhausted)
    }
}

/// Stores whose inserts succeed without reporting a generated id
pub struct NoIdStore;

#[async_trait]
impl UserStore for NoIdStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DatabaseError> {
        Ok(None)
    }

    async fn insert(&self, _user: &NewUser) -> Result<Option<i64>, DatabaseError> {
        Ok(None)
    }

    async fn list(&self, _page: Page) -> Result<Vec<User>, DatabaseError> {
        Ok(Vec::new())
    }

    async fn update(&self, _id: i64, _user: &NewUser) -> Result<u64, DatabaseError> {
        Ok(0)
    }

    async fn delete(&self, _id: i64) -> Result<u64, DatabaseError> {
        Ok(0)
    }
}

#[async_trait]
impl MovieStore for NoIdStore {
    async fn insert(&self, _movie: &NewMovie) -> Result<Option<i64>, DatabaseError> {
        Ok(None)
    }

    async fn list(&self, _page: Page) -> Result<Vec<Movie>, DatabaseError> {
        Ok(Vec::new())
    }

    async fn update(&self, _id: i64, _movie: &NewMovie) -> Result<u64, DatabaseError> {
        Ok(0)
    }

    async fn delete(&self, _id: i64) -> Result<u64, DatabaseError> {
        Ok(0)
    }
}

/// Router state over fresh in-memory stores
pub struct TestContext {
    pub users: Arc<MemoryUserStore>,
    pub movies: Arc<MemoryMovieStore>,
    pub tokens: TokenKeys,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::default()),
            movies: Arc::new(MemoryMovieStore::default()),
            tokens: TokenKeys::new(TEST_SECRET, Some(1)),
        }
    }

    pub fn state(&self) -> AppState {
        AppState::with_stores(self.users.clone(), self.movies.clone(), self.tokens.clone())
    }

    /// Insert a user directly, bypassing the HTTP layer
    pub async fn seed_user(&self, email: &str, password: &str, role: &str) -> i64 {
        let user = NewUser {
            email: email.to_string(),
            password_hash: hash_password(password).expect("hash"),
            gender: "female".to_string(),
            role: role.to_string(),
        };
        self.users.insert(&user).await.expect("insert").expect("id")
    }

    pub async fn seed_movie(&self, title: &str, year: i32) -> i64 {
        let movie = NewMovie {
            title: title.to_string(),
            genres: "Drama".to_string(),
            year,
        };
        self.movies.insert(&movie).await.expect("insert").expect("id")
    }

    pub fn token_for(&self, email: &str, role: &str) -> String {
        self.tokens.issue(email, role).expect("token")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_pages_by_id() {
        let ctx = TestContext::new();
        for year in 0..15 {
            ctx.seed_movie(&format!("Movie {}", year), 1990 + year).await;
        }

        let second = ctx.movies.list(Page::new(2).unwrap()).await.unwrap();
        assert_eq!(second.len(), 5);
        assert_eq!(second.first().unwrap().id, 11);
    }
}
