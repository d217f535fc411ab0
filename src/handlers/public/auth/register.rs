// handlers/public/auth/register.rs - POST /register handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::auth::hash_password_async;
use crate::database::models::NewUser;
use crate::error::ApiError;
use crate::handlers::utils::{json_body, Presence};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Full user field set, shared with `PUT /users/:id`
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub gender: Option<String>,
    pub role: Option<String>,
}

impl UserRequest {
    /// Presence-check every field and hash the password.
    pub async fn into_new_user(self) -> Result<NewUser, ApiError> {
        let mut presence = Presence::default();
        let email = presence.text("email", self.email);
        let password = presence.text("password", self.password);
        let gender = presence.text("gender", self.gender);
        let role = presence.text("role", self.role);
        presence.finish()?;

        let password_hash = hash_password_async(password).await.map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            ApiError::storage("Failed to store password")
        })?;

        Ok(NewUser {
            email,
            password_hash,
            gender,
            role,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    #[serde(rename = "userId")]
    pub user_id: i64,
}

/// POST /register - Create a user account
///
/// Expected Input:
/// ```json
/// { "email": "ana@example.com", "password": "hunter22", "gender": "female", "role": "admin" }
/// ```
///
/// Expected Output (201):
/// ```json
/// { "message": "Registration successful.", "userId": 42 }
/// ```
#[instrument(name = "POST /register", skip_all)]
pub async fn register_post(
    State(state): State<AppState>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> ApiResult<RegisterResponse> {
    let new_user = json_body(payload)?.into_new_user().await?;

    let user_id = state.users.insert(&new_user).await?.ok_or_else(|| {
        tracing::error!("Insert into users returned no id");
        ApiError::storage("Registration failed, no id was returned")
    })?;

    tracing::info!(user_id, "User registered");
    Ok(ApiResponse::created(RegisterResponse {
        message: "Registration successful.",
        user_id,
    }))
}
