use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Postgres SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Errors from the data access layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database configuration: {0}")]
    Config(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Failed to decode row: {0}")]
    Decode(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl DatabaseError {
    /// Whether the caller may retry the same statement later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DatabaseError::PoolExhausted | DatabaseError::Sqlx(sqlx::Error::Io(_))
        )
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Database(ref db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                DatabaseError::UniqueViolation(db.constraint().unwrap_or("unknown").to_string())
            }
            other => DatabaseError::Sqlx(other),
        }
    }
}

/// Owns the bounded connection pool shared by every request
#[derive(Clone, Debug)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Build the pool without opening a connection; the first statement connects.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let options = Self::connect_options(config)?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy_with(options);

        info!(
            "Created database pool for {}:{}/{} (max {} connections)",
            config.host, config.port, config.name, config.max_connections
        );
        Ok(Self { pool })
    }

    fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, DatabaseError> {
        if let Some(url) = &config.url {
            return url
                .parse::<PgConnectOptions>()
                .map_err(|e| DatabaseError::Config(e.to_string()));
        }

        let mut options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .database(&config.name);
        if let Some(password) = &config.password {
            options = options.password(password);
        }
        Ok(options)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Apply pending migrations from `migrations/`
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DatabaseError::Config(format!("migration failed: {}", e)))?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
