use std::sync::Arc;

use crate::auth::TokenKeys;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, MovieStore, PgMovieStore, PgUserStore, UserStore};

/// Shared handles every handler receives; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub movies: Arc<dyn MovieStore>,
    pub tokens: TokenKeys,
    /// Absent when the stores are not Postgres-backed.
    pub database: Option<DatabaseManager>,
}

impl AppState {
    /// Postgres-backed state sharing one pool between the stores
    pub fn new(config: &AppConfig, database: DatabaseManager) -> Self {
        let pool = database.pool().clone();
        Self {
            users: Arc::new(PgUserStore::new(pool.clone())),
            movies: Arc::new(PgMovieStore::new(pool)),
            tokens: TokenKeys::new(&config.security.jwt_secret, config.security.jwt_expiry_hours),
            database: Some(database),
        }
    }

    pub fn with_stores(
        users: Arc<dyn UserStore>,
        movies: Arc<dyn MovieStore>,
        tokens: TokenKeys,
    ) -> Self {
        Self {
            users,
            movies,
            tokens,
            database: None,
        }
    }
}
