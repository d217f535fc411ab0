use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::auth::ADMIN_ROLE;
use crate::error::ApiError;
use crate::state::AppState;

use super::auth::AuthUser;

/// An `AuthUser` whose token carries the admin role.
///
/// The token is verified first, so a bad or missing token answers 401 and
/// the role is only inspected for authenticated callers.
#[derive(Clone, Debug)]
pub struct AdminUser(pub AuthUser);

impl AdminUser {
    fn check(user: AuthUser) -> Result<Self, ApiError> {
        let is_admin = user.role.as_deref() == Some(ADMIN_ROLE);
        if !is_admin {
            tracing::warn!("Admin route refused for {}", user.email);
            return Err(ApiError::forbidden("Access denied, admin role required"));
        }
        Ok(AdminUser(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Self::check(user)
    }
}
