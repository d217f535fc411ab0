use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::auth::{Claims, JwtError};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated identity decoded from the request's token.
///
/// Taking `AuthUser` as a handler parameter is what makes a route
/// authenticated: extraction fails with 401 before the handler runs.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub email: String,
    pub role: Option<String>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email,
            role: claims.role,
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_token_from_headers(&parts.headers)?;

        let claims = state.tokens.verify(token).map_err(|e| {
            tracing::debug!("Rejected token: {}", e);
            match e {
                JwtError::Expired => ApiError::invalid_token("Token expired"),
                _ => ApiError::invalid_token("Invalid token"),
            }
        })?;

        Ok(AuthUser::from(claims))
    }
}

const BEARER: &str = "Bearer ";

/// Extract the token from the Authorization header.
///
/// The header carries the bare token; a `Bearer ` prefix in any case is tolerated.
fn extract_token_from_headers(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers.get(AUTHORIZATION).ok_or(ApiError::Unauthenticated)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::invalid_token("Invalid Authorization header format"))?
        .trim_start();

    // A scheme with no credentials
    if auth_str.trim_end().eq_ignore_ascii_case(BEARER.trim_end()) {
        return Err(ApiError::Unauthenticated);
    }

    // Scheme names are case-insensitive
    let token = match auth_str.get(..BEARER.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(BEARER) => &auth_str[BEARER.len()..],
        _ => auth_str,
    }
    .trim();
    if token.is_empty() {
        return Err(ApiError::Unauthenticated);
    }
    Ok(token)
}
