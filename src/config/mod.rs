use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Secret used when `JWT_SECRET` is unset outside staging/production.
const DEVELOPMENT_JWT_SECRET: &str = "development-secret-change-me";

/// Longest accepted token lifetime (ten years).
pub const MAX_JWT_EXPIRY_HOURS: u64 = 87_600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection URL. Takes precedence over the individual parts below.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub name: String,
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection before giving up.
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Token lifetime. `None` issues tokens without an `exp` claim.
    pub jwt_expiry_hours: Option<u64>,
    pub cors_permissive: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup so tests never touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        let config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        };

        config.with_overrides(&lookup)
    }

    fn with_overrides<F>(mut self, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PORT") {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }

        // Database overrides
        if let Some(v) = lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            self.database.url = Some(v);
        }
        if let Some(v) = lookup("DB_HOST") {
            self.database.host = v;
        }
        if let Some(v) = lookup("DB_PORT") {
            self.database.port = v.parse().unwrap_or(self.database.port);
        }
        if let Some(v) = lookup("DB_USER") {
            self.database.user = v;
        }
        if let Some(v) = lookup("DB_PASSWORD") {
            self.database.password = Some(v);
        }
        if let Some(v) = lookup("DB_NAME") {
            self.database.name = v;
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Security overrides
        match lookup("JWT_SECRET") {
            Some(secret) if secret.is_empty() => {
                return Err(ConfigError::Invalid("JWT_SECRET must not be empty".to_string()));
            }
            Some(secret) => self.security.jwt_secret = secret,
            None if self.environment != Environment::Development => {
                return Err(ConfigError::Missing("JWT_SECRET"));
            }
            None => {
                tracing::warn!("JWT_SECRET not set, using the development signing secret");
            }
        }
        if let Some(v) = lookup("SECURITY_JWT_EXPIRY_HOURS") {
            if let Ok(hours) = v.parse::<u64>() {
                if hours > MAX_JWT_EXPIRY_HOURS {
                    return Err(ConfigError::Invalid(format!(
                        "SECURITY_JWT_EXPIRY_HOURS must be at most {}",
                        MAX_JWT_EXPIRY_HOURS
                    )));
                }
                self.security.jwt_expiry_hours = (hours > 0).then_some(hours);
            }
        }
        if let Some(v) = lookup("SECURITY_CORS_PERMISSIVE") {
            self.security.cors_permissive = v.parse().unwrap_or(self.security.cors_permissive);
        }

        Ok(self)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig { port: 3000 },
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout: 30,
                ..DatabaseConfig::local()
            },
            security: SecurityConfig {
                jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
                jwt_expiry_hours: Some(24),
                cors_permissive: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig { port: 3000 },
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 10,
                ..DatabaseConfig::local()
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: Some(24),
                cors_permissive: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig { port: 3000 },
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout: 5,
                ..DatabaseConfig::local()
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: Some(24),
                cors_permissive: true,
            },
        }
    }
}

impl DatabaseConfig {
    fn local() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: None,
            name: "postgres".to_string(),
            max_connections: 10,
            connection_timeout: 30,
        }
    }
}
