//! # API Configuration Module
//!
//! Loads the TutorHub API server configuration from environment variables,
//! falling back to defaults where a value is optional.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `GENERATOR_SAMPLE_LIMIT`: Items kept per duplicates/conflicts sample (default: 5)
//! - `GENERATOR_MAX_RANGE_DAYS`: Longest date range one request may cover (default: 366)

use eyre::{Result, WrapErr, eyre};
use std::env;
use tracing::Level;
use tutorhub_core::settings::GeneratorSettings;

/// Configuration for the TutorHub API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use tutorhub_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Tunables handed to the session generator
    pub generator: GeneratorSettings,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// - `DATABASE_URL` is not set
    /// - `API_PORT`, `GENERATOR_SAMPLE_LIMIT` or `GENERATOR_MAX_RANGE_DAYS`
    ///   cannot be parsed
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = match lookup("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);

        // Generator settings
        let sample_limit = match lookup("GENERATOR_SAMPLE_LIMIT") {
            Some(value) => value
                .parse()
                .wrap_err("Invalid GENERATOR_SAMPLE_LIMIT value")?,
            None => GeneratorSettings::DEFAULT_SAMPLE_LIMIT,
        };
        let max_range_days = match lookup("GENERATOR_MAX_RANGE_DAYS") {
            Some(value) => value
                .parse()
                .wrap_err("Invalid GENERATOR_MAX_RANGE_DAYS value")?,
            None => GeneratorSettings::DEFAULT_MAX_RANGE_DAYS,
        };
        if max_range_days < 1 {
            return Err(eyre!("GENERATOR_MAX_RANGE_DAYS must be at least 1"));
        }

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            generator: GeneratorSettings {
                sample_limit,
                max_range_days,
            },
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
