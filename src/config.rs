use chrono::{DateTime, Utc};
use sea_orm::ConnectOptions;
use std::env;
use std::str::FromStr;

/// Pollutants reported by the air-pollution history API.
pub const DEFAULT_COMPONENTS: [&str; 8] = ["co", "no", "no2", "o3", "so2", "pm2_5", "pm10", "nh3"];

const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5/air_pollution/history";
const DEFAULT_LATITUDE: &str = "44.9369";
const DEFAULT_LONGITUDE: &str = "-123.0280";
const DEFAULT_START: &str = "2025-04-03T02:00:00Z";
const DEFAULT_END: &str = "2025-04-20T19:00:00Z";
const DEFAULT_HTTP_TIMEOUT_SECONDS: &str = "60";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // Air pollution API
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub http_timeout_seconds: u64,

    // Backfill target
    pub location: Coordinate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub components: Vec<String>,

    // Logging
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if `DB_URL` is not set, or
    /// `ConfigError::Invalid` if an override cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup. Empty values
    /// count as unset.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            // Database
            database_url: get("DB_URL").ok_or(ConfigError::Missing("DB_URL"))?,

            // Air pollution API
            api_base_url: get("AIR_POLLUTION_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: get("API_KEY"),
            http_timeout_seconds: parse_var(
                "HTTP_TIMEOUT_SECONDS",
                get("HTTP_TIMEOUT_SECONDS"),
                DEFAULT_HTTP_TIMEOUT_SECONDS,
            )?,

            // Backfill target
            location: Coordinate {
                latitude: parse_var(
                    "BACKFILL_LATITUDE",
                    get("BACKFILL_LATITUDE"),
                    DEFAULT_LATITUDE,
                )?,
                longitude: parse_var(
                    "BACKFILL_LONGITUDE",
                    get("BACKFILL_LONGITUDE"),
                    DEFAULT_LONGITUDE,
                )?,
            },
            start: parse_instant("BACKFILL_START", get("BACKFILL_START"), DEFAULT_START)?,
            end: parse_instant("BACKFILL_END", get("BACKFILL_END"), DEFAULT_END)?,
            components: DEFAULT_COMPONENTS.iter().map(ToString::to_string).collect(),

            // Logging
            log_format: LogFormat::from_str(&get("LOG_FORMAT").unwrap_or_default()),
        })
    }

    /// Options for the single connection the backfill holds for the whole run.
    #[must_use]
    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.database_url.as_str());
        options.max_connections(1).min_connections(1);
        options
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_var<T: FromStr>(
    var: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<T, ConfigError> {
    let raw = value.unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value: raw })
}

fn parse_instant(
    var: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<DateTime<Utc>, ConfigError> {
    let raw = value.unwrap_or_else(|| default.to_string());
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ConfigError::Invalid { var, value: raw })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}
