use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod password;

pub use password::{
    hash_password, hash_password_async, verify_password, verify_password_async, PasswordError,
    UNKNOWN_USER_HASH,
};

/// Role value the admin gate admits
pub const ADMIN_ROLE: &str = "admin";

/// Identity claims carried by every issued token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Claims issued now. Fails when `expiry_hours` overflows the clock.
    pub fn new(
        email: impl Into<String>,
        role: impl Into<String>,
        expiry_hours: Option<u64>,
    ) -> Result<Self, JwtError> {
        let now = Utc::now();
        let exp = match expiry_hours {
            Some(hours) => {
                let expires_at = i64::try_from(hours)
                    .ok()
                    .and_then(Duration::try_hours)
                    .and_then(|lifetime| now.checked_add_signed(lifetime))
                    .ok_or_else(|| {
                        JwtError::TokenGeneration(format!("expiry of {} hours is out of range", hours))
                    })?;
                Some(expires_at.timestamp())
            }
            None => None,
        };

        Ok(Self {
            email: email.into(),
            role: Some(role.into()),
            iat: now.timestamp(),
            exp,
        })
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Signing and verification keys derived from the shared secret
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: Option<u64>,
}

impl TokenKeys {
    pub fn new(secret: &str, expiry_hours: Option<u64>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    /// Sign a token for `email` carrying `role`
    pub fn issue(&self, email: &str, role: &str) -> Result<String, JwtError> {
        let claims = Claims::new(email, role, self.expiry_hours)?;
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Check the signature (and `exp`, when present) and decode the claims
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::default();
        // Tokens minted with expiry disabled have no exp claim
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e.to_string()),
            })
    }
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("expiry_hours", &self.expiry_hours)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_decodes_to_same_email() {
        let keys = TokenKeys::new("test-secret", Some(1));
        let token = keys.issue("ana@example.com", "admin").unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.role.as_deref(), Some("admin"));
        assert!(claims.exp.unwrap() > claims.iat);
    }

    #[test]
    fn token_without_expiry_is_accepted() {
        let keys = TokenKeys::new("test-secret", None);
        let token = keys.issue("ana@example.com", "viewer").unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = TokenKeys::new("one", None).issue("ana@example.com", "admin").unwrap();
        let result = TokenKeys::new("two", None).verify(&token);
        assert!(matches!(result, Err(JwtError::Invalid(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = TokenKeys::new("test-secret", None);
        let claims = Claims {
            email: "ana@example.com".to_string(),
            role: Some("admin".to_string()),
            iat: Utc::now().timestamp() - 7200,
            exp: Some(Utc::now().timestamp() - 3600),
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).unwrap();

        assert!(matches!(keys.verify(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn garbage_is_rejected() {
        let keys = TokenKeys::new("test-secret", None);
        assert!(matches!(keys.verify("not.a.jwt"), Err(JwtError::Invalid(_))));
        assert!(matches!(keys.verify(""), Err(JwtError::Invalid(_))));
    }

    #[test]
    fn out_of_range_expiry_fails_instead_of_panicking() {
        for hours in [10_000_000_000_000, u64::MAX] {
            let result = TokenKeys::new("test-secret", Some(hours)).issue("ana@example.com", "admin");
            assert!(matches!(result, Err(JwtError::TokenGeneration(_))), "hours {}", hours);
        }
    }

    #[test]
    fn longest_configured_expiry_still_verifies() {
        let keys = TokenKeys::new("test-secret", Some(crate::config::MAX_JWT_EXPIRY_HOURS));
        let token = keys.issue("ana@example.com", "admin").unwrap();
        assert!(keys.verify(&token).is_ok());
    }
}
