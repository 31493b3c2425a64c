/*
 * Responsibility
 * - 環境変数の読み込み (APPROOV_BASE64_SECRET, policy toggles, header names)
 * - 設定値のバリデーション (不足・不正なら起動失敗)
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderName;

use crate::services::approov::{PolicyConfig, SecretError, SharedSecret};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn from_value(value: Option<&str>) -> Self {
        match value
            .unwrap_or("development")
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Transport limits applied by `middleware::http` to every route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpConfig {
    pub body_limit_bytes: usize,
    pub request_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            body_limit_bytes: 1024 * 1024,
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub http: HttpConfig,

    pub approov_secret: SharedSecret,
    pub policy: PolicyConfig,

    pub token_header: HeaderName,
    pub binding_header: HeaderName,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (process env in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = lookup("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(8002);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_value(lookup("APP_ENV").as_deref());

        let defaults = HttpConfig::default();
        let http = HttpConfig {
            body_limit_bytes: lookup("HTTP_BODY_LIMIT_BYTES")
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.body_limit_bytes),
            request_timeout: lookup("HTTP_REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|v| *v > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        };

        let encoded_secret =
            lookup("APPROOV_BASE64_SECRET").ok_or(ConfigError::Missing("APPROOV_BASE64_SECRET"))?;
        let approov_secret = SharedSecret::from_base64(&encoded_secret).map_err(|e| match e {
            SecretError::Empty => ConfigError::Missing("APPROOV_BASE64_SECRET"),
            SecretError::InvalidBase64 => ConfigError::Invalid("APPROOV_BASE64_SECRET"),
        })?;

        let policy = PolicyConfig {
            abort_on_invalid_token: flag(&lookup, "APPROOV_ABORT_ON_INVALID_TOKEN", true)?,
            abort_on_invalid_binding: flag(&lookup, "APPROOV_ABORT_ON_INVALID_BINDING", true)?,
            audit_logging_enabled: flag(&lookup, "APPROOV_LOGGING_ENABLED", true)?,
        };

        let token_header = header_name(&lookup, "APPROOV_TOKEN_HEADER", "Approov-Token")?;
        let binding_header = header_name(&lookup, "APPROOV_BINDING_HEADER", "Authorization")?;

        Ok(Self {
            addr,
            app_env,
            http,
            approov_secret,
            policy,
            token_header,
            binding_header,
        })
    }
}

// Security toggles never fall back to the default on a typo.
fn flag<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid(key)),
    }
}

fn header_name<F>(lookup: &F, key: &'static str, default: &str) -> Result<HeaderName, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string());

    HeaderName::from_bytes(raw.as_bytes()).map_err(|_| ConfigError::Invalid(key))
}
