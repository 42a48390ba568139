/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, CORS 許可、JWT 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::services::auth::TokenConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Upper bound for any duration read from the environment (100 years).
const MAX_SECONDS: u64 = 100 * 365 * 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Only the database keys; used on its own by the `seed` command.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let max_connections: u32 = env_or("DATABASE_MAX_CONNECTIONS", 5)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"));
        }

        Ok(Self {
            url,
            max_connections,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub database: DatabaseConfig,

    pub cors_allowed_origins: Vec<String>,
    pub graphql_endpoint: String,
    pub body_limit_bytes: usize,
    pub request_timeout: Duration,

    pub token: TokenConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = env_or("PORT", 3000)?;
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let database = DatabaseConfig::from_env()?;

        let cors_allowed_origins =
            parse_origins(&std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let graphql_endpoint =
            std::env::var("GRAPHQL_ENDPOINT").unwrap_or_else(|_| "/graphql".to_string());
        if !graphql_endpoint.starts_with('/') {
            return Err(ConfigError::Invalid("GRAPHQL_ENDPOINT"));
        }

        let body_limit_bytes: usize = env_or("HTTP_BODY_LIMIT_BYTES", 1024 * 1024)?; // 1 MiB

        let request_timeout = Duration::from_secs(env_seconds("HTTP_TIMEOUT_SECONDS", 30)?);

        let secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if secret.trim().is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }

        // 1 hour / 7 days ("remember me")
        let ttl_seconds = env_seconds("JWT_EXPIRATION_TIME", 3600)?;
        let extended_ttl_seconds = env_seconds("JWT_EXTENDED_EXPIRATION_TIME", 604_800)?;

        Ok(Self {
            addr,
            app_env,
            database,
            cors_allowed_origins,
            graphql_endpoint,
            body_limit_bytes,
            request_timeout,
            token: TokenConfig::new(secret, ttl_seconds, extended_ttl_seconds),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    parse_or(key, std::env::var(key).ok().as_deref(), default)
}

fn env_seconds(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    parse_seconds(key, std::env::var(key).ok().as_deref(), default)
}

// Unset (or blank) falls back to the default; set-but-garbage fails start-up.
fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<&str>,
    default: T,
) -> Result<T, ConfigError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

fn parse_seconds(key: &'static str, raw: Option<&str>, default: u64) -> Result<u64, ConfigError> {
    let secs = parse_or(key, raw, default)?;
    if secs == 0 || secs > MAX_SECONDS {
        return Err(ConfigError::Invalid(key));
    }
    Ok(secs)
}
