use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewUser, User};
use crate::database::page::Page;
use crate::database::statement::Statement;

/// Storage operations on the `users` table
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    /// Insert a row and return the generated id, if storage reported one.
    async fn insert(&self, user: &NewUser) -> Result<Option<i64>, DatabaseError>;

    async fn list(&self, page: Page) -> Result<Vec<User>, DatabaseError>;

    /// Replace every field of row `id`; returns affected rows.
    async fn update(&self, id: i64, user: &NewUser) -> Result<u64, DatabaseError>;

    /// Remove row `id`; returns affected rows.
    async fn delete(&self, id: i64) -> Result<u64, DatabaseError>;
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[instrument(name = "users.find_by_email", skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let rows = Statement::new(
            "SELECT id, email, password_hash, gender, role, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_rows(&self.pool)
        .await?;

        rows.into_iter().next().map(User::try_from).transpose()
    }

    #[instrument(name = "users.insert", skip(self, user), fields(email = %user.email))]
    async fn insert(&self, user: &NewUser) -> Result<Option<i64>, DatabaseError> {
        let rows = Statement::new(
            "INSERT INTO users (email, password_hash, gender, role) VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.gender.as_str())
        .bind(user.role.as_str())
        .fetch_rows(&self.pool)
        .await?;

        Ok(rows.first().and_then(|row| row.get("id")).and_then(|id| id.as_i64()))
    }

    #[instrument(name = "users.list", skip(self))]
    async fn list(&self, page: Page) -> Result<Vec<User>, DatabaseError> {
        Statement::new(
            "SELECT id, email, password_hash, gender, role, created_at FROM users ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_rows(&self.pool)
        .await?
        .into_iter()
        .map(User::try_from)
        .collect()
    }

    #[instrument(name = "users.update", skip(self, user))]
    async fn update(&self, id: i64, user: &NewUser) -> Result<u64, DatabaseError> {
        Statement::new(
            "UPDATE users SET email = $1, password_hash = $2, gender = $3, role = $4 WHERE id = $5",
        )
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.gender.as_str())
        .bind(user.role.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
    }

    #[instrument(name = "users.delete", skip(self))]
    async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        Statement::new("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
    }
}
