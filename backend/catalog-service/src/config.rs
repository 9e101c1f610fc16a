/// Configuration management for Catalog Service
///
/// Configuration is read from environment variables (a `.env` file is honoured via
/// `dotenvy`). Every value has a development default except the CORS origin list,
/// which must be set explicitly in production.
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Configuration loading failures
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("{0} must be set in production")]
    MissingInProduction(&'static str),

    #[error("CORS_ALLOWED_ORIGINS cannot be '*' in production")]
    WildcardCorsInProduction,
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Storage backend selection
    pub storage: StorageBackend,
    /// Database configuration (postgres backend only)
    pub database: DatabaseConfig,
    /// Logging configuration
    pub log: LogConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
    /// Optional scope prefix for the resource routes, e.g. `/api`
    pub api_prefix: String,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, or `*`
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(ConfigError::InvalidValue {
                key: "CATALOG_STORAGE",
                value: value.to_string(),
            }),
        }
    }
}

/// Database configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
    /// Min connections kept open
    pub min_connections: u32,
    /// Timeout for establishing and verifying a connection
    pub connect_timeout_secs: u64,
    /// Timeout for acquiring a connection from the pool
    pub acquire_timeout_secs: u64,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        let allowed_origins = match env::var("CORS_ALLOWED_ORIGINS") {
            Ok(value) => value,
            Err(_) if production => {
                return Err(ConfigError::MissingInProduction("CORS_ALLOWED_ORIGINS"))
            }
            Err(_) => "*".to_string(),
        };
        if production && allowed_origins.trim() == "*" {
            return Err(ConfigError::WildcardCorsInProduction);
        }

        let storage = match env::var("CATALOG_STORAGE") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::Postgres,
        };

        let log_format = match env::var("LOG_FORMAT") {
            Ok(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
            Ok(value) if value.eq_ignore_ascii_case("text") => LogFormat::Text,
            Ok(value) => {
                return Err(ConfigError::InvalidValue {
                    key: "LOG_FORMAT",
                    value,
                })
            }
            Err(_) => LogFormat::Text,
        };

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: env::var("CATALOG_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("CATALOG_SERVICE_PORT", 8080)?,
                api_prefix: normalize_prefix(
                    &env::var("CATALOG_API_PREFIX").unwrap_or_default(),
                ),
            },
            cors: CorsConfig { allowed_origins },
            storage,
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgres://localhost/catalog".to_string()),
                max_connections: parse_var("DB_MAX_CONNECTIONS", 10)?,
                min_connections: parse_var("DB_MIN_CONNECTIONS", 1)?,
                connect_timeout_secs: parse_var("DB_CONNECT_TIMEOUT_SECS", 5)?,
                acquire_timeout_secs: parse_var("DB_ACQUIRE_TIMEOUT_SECS", 10)?,
            },
            log: LogConfig { format: log_format },
        })
    }
}

fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(default),
    }
}

/// `api/` and `/api/` both become `/api`; blank stays blank.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
