use serde::{Deserialize, Serialize};

use crate::database::statement::DbRow;
use crate::database::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub gender: String,
    pub role: String,
    pub created_at: Option<String>,
}

impl TryFrom<DbRow> for User {
    type Error = DatabaseError;

    fn try_from(row: DbRow) -> Result<Self, Self::Error> {
        serde_json::from_value(serde_json::Value::Object(row))
            .map_err(|e| DatabaseError::Decode(format!("users row: {}", e)))
    }
}

/// Full field set written by register and update
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub gender: String,
    pub role: String,
}
