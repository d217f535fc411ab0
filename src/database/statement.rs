//! Parameterized statements against the shared pool.
//!
//! A `Statement` pairs SQL text using `$n` placeholders with the ordered values
//! bound to them. Values never enter the SQL text.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Column, PgPool, Postgres, Row, TypeInfo};

use crate::database::manager::DatabaseError;

/// One result row keyed by column name
pub type DbRow = Map<String, Value>;

/// A value bound to a positional placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i32),
    BigInt(i64),
    Text(String),
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        SqlParam::Int(v)
    }
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::BigInt(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

#[derive(Debug, Clone)]
pub struct Statement {
    sql: &'static str,
    params: Vec<SqlParam>,
}

impl Statement {
    pub fn new(sql: &'static str) -> Self {
        Self { sql, params: Vec::new() }
    }

    /// Bind the next positional value
    pub fn bind(mut self, value: impl Into<SqlParam>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn sql(&self) -> &str {
        self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    fn query(&self) -> Query<'_, Postgres, PgArguments> {
        self.params.iter().fold(sqlx::query(self.sql), |q, p| match p {
            SqlParam::Int(i) => q.bind(*i),
            SqlParam::BigInt(i) => q.bind(*i),
            SqlParam::Text(s) => q.bind(s.as_str()),
        })
    }

    /// Run the statement and return every row, in result order
    pub async fn fetch_rows(&self, pool: &PgPool) -> Result<Vec<DbRow>, DatabaseError> {
        tracing::debug!(sql = self.sql, params = self.params.len(), "fetch_rows");
        let rows = self.query().fetch_all(pool).await?;
        rows.iter().map(row_to_map).collect()
    }

    /// Run the statement and return the number of affected rows
    pub async fn execute(&self, pool: &PgPool) -> Result<u64, DatabaseError> {
        tracing::debug!(sql = self.sql, params = self.params.len(), "execute");
        let result = self.query().execute(pool).await?;
        Ok(result.rows_affected())
    }
}

fn row_to_map(row: &PgRow) -> Result<DbRow, DatabaseError> {
    let mut map = Map::new();
    for (i, column) in row.columns().iter().enumerate() {
        map.insert(column.name().to_string(), column_value(row, i, column.type_info().name())?);
    }
    Ok(map)
}

fn column_value(row: &PgRow, i: usize, type_name: &str) -> Result<Value, DatabaseError> {
    let value = match type_name {
        "INT2" => row.try_get::<Option<i16>, _>(i)?.map(Value::from),
        "INT4" => row.try_get::<Option<i32>, _>(i)?.map(Value::from),
        "INT8" => row.try_get::<Option<i64>, _>(i)?.map(Value::from),
        "FLOAT4" | "FLOAT8" => row.try_get::<Option<f64>, _>(i)?.map(Value::from),
        "BOOL" => row.try_get::<Option<bool>, _>(i)?.map(Value::from),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => row.try_get::<Option<String>, _>(i)?.map(Value::from),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(i)?
            .map(|t| Value::String(t.to_rfc3339())),
        "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(i)?,
        other => {
            return Err(DatabaseError::Decode(format!(
                "unsupported column type {} for column {}",
                other, i
            )))
        }
    };
    Ok(value.unwrap_or(Value::Null))
}
