// src/config.rs
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP bind host (e.g., 0.0.0.0)
    pub app_host: String,
    /// HTTP bind port (e.g., 3000)
    pub app_port: u16,

    /// Upstream credential. Absence is reported per request, not at startup.
    pub gemini_api_key: Option<String>,
    /// e.g. https://generativelanguage.googleapis.com/v1beta
    pub gemini_base_url: Url,
    pub gemini_model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub upstream_timeout: Duration,

    /// Pre-built dashboard bundle served for non-API paths.
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid URL for {name}: {value}")]
    InvalidUrl { name: &'static str, value: String },
    #[error("Invalid number for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("Invalid value for {name}: {reason}")]
    Other { name: &'static str, reason: String },
}

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env if present
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let app_host = get("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let app_port = parse_or_default::<u16>(get("APP_PORT"), "APP_PORT", 3000)?;

        let gemini_api_key = get("GEMINI_API_KEY");
        let gemini_base_url = parse_url(
            get("GEMINI_BASE_URL").as_deref().unwrap_or(DEFAULT_GEMINI_BASE_URL),
            "GEMINI_BASE_URL",
        )?;
        let gemini_model = get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let temperature = parse_or_default::<f32>(get("GEMINI_TEMPERATURE"), "GEMINI_TEMPERATURE", 0.7)?;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::Other {
                name: "GEMINI_TEMPERATURE",
                reason: format!("{temperature} is outside 0.0..=2.0"),
            });
        }
        let max_output_tokens =
            parse_or_default::<u32>(get("GEMINI_MAX_OUTPUT_TOKENS"), "GEMINI_MAX_OUTPUT_TOKENS", 1024)?;

        let timeout_secs = parse_or_default::<u64>(get("UPSTREAM_TIMEOUT_SECS"), "UPSTREAM_TIMEOUT_SECS", 30)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Other {
                name: "UPSTREAM_TIMEOUT_SECS",
                reason: "must be at least 1".to_string(),
            });
        }

        let static_dir = get("STATIC_DIR").map(PathBuf::from);

        Ok(Self {
            app_host,
            app_port,
            gemini_api_key,
            gemini_base_url,
            gemini_model,
            temperature,
            max_output_tokens,
            upstream_timeout: Duration::from_secs(timeout_secs),
            static_dir,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}

/* --------------------------- helpers --------------------------- */

fn parse_or_default<T: FromStr>(
    raw: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(v) => v.trim().parse::<T>().map_err(|_| ConfigError::InvalidNumber {
            name: key,
            value: v,
        }),
        None => Ok(default),
    }
}

fn parse_url(raw: &str, key: &'static str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|_| ConfigError::InvalidUrl {
        name: key,
        value: raw.to_string(),
    })
}
