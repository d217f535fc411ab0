use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Json, Path, Query};
use serde::{Deserialize, Serialize};

use crate::database::Page;
use crate::error::ApiError;

/// Unwrap a JSON body, turning axum's rejection into a 400 with our error shape
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e.body_text())))
}

/// Unwrap a numeric `:id` path segment
pub fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::bad_request("Path id must be an integer"))
}

/// `{"message": ...}` body for updates
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Collects presence failures so one response names every missing field
#[derive(Debug, Default)]
pub struct Presence {
    missing: Vec<&'static str>,
}

impl Presence {
    /// Keep a present, non-blank string; remember `name` otherwise.
    pub fn text(&mut self, name: &'static str, value: Option<String>) -> String {
        match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => {
                self.missing.push(name);
                String::new()
            }
        }
    }

    /// Keep a present, non-zero number; remember `name` otherwise.
    pub fn number(&mut self, name: &'static str, value: Option<i32>) -> i32 {
        match value {
            Some(v) if v != 0 => v,
            _ => {
                self.missing.push(name);
                0
            }
        }
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::bad_request(format!(
                "Please fill in all fields: {}",
                self.missing.join(", ")
            )))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Resolve `?page=` into a page; absent means the first page.
pub fn page_from_query(query: Result<Query<PageQuery>, QueryRejection>) -> Result<Page, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;

    match query.page.as_deref().map(str::trim) {
        None | Some("") => Ok(Page::default()),
        Some(raw) => raw
            .parse::<i64>()
            .ok()
            .and_then(Page::new)
            .ok_or_else(|| ApiError::bad_request("page must be an integer of at least 1")),
    }
}
