// handlers/public/auth/login.rs - POST /login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::auth::{verify_password_async, PasswordError, UNKNOWN_USER_HASH};
use crate::error::ApiError;
use crate::handlers::utils::{json_body, Presence};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /login - Authenticate with email and password and receive a token
///
/// Expected Input:
/// ```json
/// { "email": "ana@example.com", "password": "hunter22" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "token": "eyJhbGciOiJIUzI1NiI..." }
/// ```
#[instrument(name = "POST /login", skip_all)]
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let body = json_body(payload)?;

    let mut presence = Presence::default();
    let email = presence.text("email", body.email);
    let password = presence.text("password", body.password);
    presence.finish()?;

    let user = state.users.find_by_email(&email).await?;

    // Unknown emails pay the same Argon2 cost as wrong passwords
    let hash = user
        .as_ref()
        .map_or_else(|| UNKNOWN_USER_HASH.to_string(), |u| u.password_hash.clone());
    let verified = verify_password_async(password, hash).await;

    let Some(user) = user else {
        tracing::warn!(%email, "Login failed: unknown email");
        return Err(ApiError::AuthenticationFailed);
    };

    match verified {
        Ok(()) => {}
        Err(PasswordError::VerificationFailed) => {
            tracing::warn!(%email, "Login failed: wrong password");
            return Err(ApiError::AuthenticationFailed);
        }
        Err(e) => {
            tracing::error!(user_id = user.id, "Stored password hash unusable: {}", e);
            return Err(ApiError::storage("Failed to authenticate"));
        }
    }

    let token = state.tokens.issue(&user.email, &user.role).map_err(|e| {
        tracing::error!("Token issue failed: {}", e);
        ApiError::storage("Failed to authenticate")
    })?;

    tracing::info!(user_id = user.id, "User authenticated");
    Ok(ApiResponse::success(LoginResponse { token }))
}
