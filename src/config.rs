use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const GEOCODING_LANGUAGE: &str = "pt";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
pub const CONNECT_TIMEOUT_SECS: u64 = 5;
pub const CACHE_TTL_SECS: u64 = 600; // 10 minutes
pub const CACHE_CAPACITY: usize = 100; // distinct cities

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub geocoding_url: String,
    pub forecast_url: String,
    pub geocoding_language: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: ([127, 0, 0, 1], 8000).into(),
            geocoding_url: GEOCODING_URL.to_string(),
            forecast_url: FORECAST_URL.to_string(),
            geocoding_language: GEOCODING_LANGUAGE.to_string(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(CACHE_TTL_SECS),
            cache_capacity: CACHE_CAPACITY,
        }
    }
}

impl Config {
    /// Loads `.env` if present, then overrides defaults with `CLIMA_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("CLIMA_BIND_ADDR") {
            config.bind_addr = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                var: "CLIMA_BIND_ADDR",
                reason: format!("{}", e),
            })?;
        }
        if let Some(raw) = lookup("CLIMA_GEOCODING_URL") {
            config.geocoding_url = non_empty(raw, "CLIMA_GEOCODING_URL")?;
        }
        if let Some(raw) = lookup("CLIMA_FORECAST_URL") {
            config.forecast_url = non_empty(raw, "CLIMA_FORECAST_URL")?;
        }
        if let Some(raw) = lookup("CLIMA_GEOCODING_LANGUAGE") {
            config.geocoding_language = non_empty(raw, "CLIMA_GEOCODING_LANGUAGE")?;
        }
        if let Some(raw) = lookup("CLIMA_REQUEST_TIMEOUT_SECS") {
            config.request_timeout =
                Duration::from_secs(positive(&raw, "CLIMA_REQUEST_TIMEOUT_SECS")?);
        }
        if let Some(raw) = lookup("CLIMA_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout =
                Duration::from_secs(positive(&raw, "CLIMA_CONNECT_TIMEOUT_SECS")?);
        }
        if let Some(raw) = lookup("CLIMA_CACHE_TTL_SECS") {
            config.cache_ttl = Duration::from_secs(positive(&raw, "CLIMA_CACHE_TTL_SECS")?);
        }
        if let Some(raw) = lookup("CLIMA_CACHE_CAPACITY") {
            config.cache_capacity = positive(&raw, "CLIMA_CACHE_CAPACITY")? as usize;
        }

        Ok(config)
    }
}

fn non_empty(raw: String, var: &'static str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid {
            var,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

fn positive(raw: &str, var: &'static str) -> Result<u64, ConfigError> {
    let parsed = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
        var,
        reason: format!("expected a positive integer, got {:?}", raw),
    })?;
    if parsed == 0 {
        return Err(ConfigError::Invalid {
            var,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(parsed)
}
