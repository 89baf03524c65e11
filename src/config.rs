// ==================== config.rs ====================
use crate::error::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_PORT_ATTEMPTS: u16 = 10;
pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub port_attempts: u16,
    pub geocoding_url: String,
    pub archive_url: String,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            port_attempts: DEFAULT_PORT_ATTEMPTS,
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or empty keys fall back
    /// to their defaults, malformed numbers are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => parse_number(&raw, "PORT")?,
            None => DEFAULT_PORT,
        };

        let port_attempts: u16 = match get("PORT_ATTEMPTS") {
            Some(raw) => parse_number(&raw, "PORT_ATTEMPTS")?,
            None => DEFAULT_PORT_ATTEMPTS,
        };
        if port_attempts == 0 {
            return Err(AppError::Config("PORT_ATTEMPTS must be at least 1".to_string()));
        }

        let timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => parse_number(&raw, "HTTP_TIMEOUT_SECS")?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            port,
            port_attempts,
            geocoding_url: get("GEOCODING_API_URL")
                .unwrap_or_else(|| DEFAULT_GEOCODING_URL.to_string()),
            archive_url: get("ARCHIVE_API_URL")
                .unwrap_or_else(|| DEFAULT_ARCHIVE_URL.to_string()),
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, key: &str) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid {}: {} ({})", key, raw, e)))
}
