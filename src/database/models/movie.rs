use serde::{Deserialize, Serialize};

use crate::database::statement::DbRow;
use crate::database::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    /// Comma-separated genre names
    pub genres: String,
    pub year: i32,
}

impl TryFrom<DbRow> for Movie {
    type Error = DatabaseError;

    fn try_from(row: DbRow) -> Result<Self, Self::Error> {
        serde_json::from_value(serde_json::Value::Object(row))
            .map_err(|e| DatabaseError::Decode(format!("movies row: {}", e)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub genres: String,
    pub year: i32,
}
