use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_PRIMARY_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_SECONDARY_API_URL: &str = "http://localhost:5000";
const DEFAULT_STATIC_DIR: &str = "public";

/// Upper bound on remote chat attempts, first try included.
pub const MAX_CHAT_ATTEMPTS: u32 = 2;

#[derive(Debug, Clone)]
pub struct Config {
    pub primary_api_url: String,
    pub secondary_api_url: String,
    pub request_timeout_ms: u64,
    pub chat_max_attempts: u32,
    pub chat_retry_delay_ms: u64,
    pub token_store_path: PathBuf,
    pub server_host: String,
    pub server_port: u16,
    pub static_dir: PathBuf,
    pub index_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let static_dir = PathBuf::from(DEFAULT_STATIC_DIR);
        Self {
            primary_api_url: DEFAULT_PRIMARY_API_URL.to_string(),
            secondary_api_url: DEFAULT_SECONDARY_API_URL.to_string(),
            request_timeout_ms: 8000,
            chat_max_attempts: 2,
            chat_retry_delay_ms: 600,
            token_store_path: PathBuf::from("eveshield_tokens.json"),
            server_host: "0.0.0.0".to_string(),
            server_port: 5000,
            index_file: static_dir.join("index.html"),
            static_dir,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let defaults = Config::default();
        let static_dir = optional_env("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);
        let index_file = optional_env("INDEX_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| static_dir.join("index.html"));

        let config = Config {
            primary_api_url: base_url_env("PRIMARY_API_URL", &defaults.primary_api_url)?,
            secondary_api_url: base_url_env("SECONDARY_API_URL", &defaults.secondary_api_url)?,
            request_timeout_ms: parse_env("REQUEST_TIMEOUT_MS", defaults.request_timeout_ms)?,
            chat_max_attempts: parse_env("CHAT_MAX_ATTEMPTS", defaults.chat_max_attempts)?,
            chat_retry_delay_ms: parse_env("CHAT_RETRY_DELAY_MS", defaults.chat_retry_delay_ms)?,
            token_store_path: optional_env("TOKEN_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.token_store_path),
            server_host: optional_env("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_env("SERVER_PORT", defaults.server_port)?,
            static_dir,
            index_file,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_CHAT_ATTEMPTS).contains(&self.chat_max_attempts) {
            return Err(ConfigError::InvalidConfiguration(format!(
                "CHAT_MAX_ATTEMPTS must be between 1 and {MAX_CHAT_ATTEMPTS}"
            )));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn chat_retry_delay(&self) -> Duration {
        Duration::from_millis(self.chat_retry_delay_ms)
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match optional_env(key) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

fn base_url_env(key: &str, default: &str) -> Result<String, ConfigError> {
    let url = optional_env(key).unwrap_or_else(|| default.to_string());
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::InvalidConfiguration(format!(
            "{key} must start with http:// or https://"
        )));
    }
    Ok(url.trim_end_matches('/').to_string())
}
