//! # API Configuration Module
//!
//! Loads the server configuration from environment variables, with defaults
//! where a sensible one exists.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 8080)
//! - `STORAGE_BACKEND`: `postgres` (default) or `memory`
//! - `DATABASE_URL`: PostgreSQL connection string (required for `postgres`)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `ADMIN_PASSWORD`: Password guarding operator endpoints (optional)
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)

use eyre::{Result, WrapErr, bail};
use std::env;
use tracing::Level;

/// Where slots and reservations are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL, one serializable transaction per request
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    /// Process memory; everything is lost on restart
    Memory,
}

/// Configuration for the reservation API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use reservation_api::config::ApiConfig;
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

    /// Storage backend and its connection settings
    pub storage: StorageBackend,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Admin password in plain text; hashed before the server starts
    pub admin_password: Option<String>,

    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl ApiConfig {
    /// Creates a new ApiConfig from the process environment
    ///
    /// # Errors
    ///
    /// - `STORAGE_BACKEND` is neither `postgres` nor `memory`
    /// - `DATABASE_URL` is missing while the backend is `postgres`
    /// - `API_PORT` or `DATABASE_MAX_CONNECTIONS` is not a number
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Storage settings
        let storage = match lookup("STORAGE_BACKEND")
            .unwrap_or_else(|| "postgres".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "postgres" => {
                let database_url = lookup("DATABASE_URL")
                    .ok_or_else(|| eyre::eyre!("DATABASE_URL environment variable must be set"))?;
                let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|| "5".to_string())
                    .parse()
                    .wrap_err("Invalid DATABASE_MAX_CONNECTIONS value")?;
                StorageBackend::Postgres {
                    database_url,
                    max_connections,
                }
            }
            "memory" => StorageBackend::Memory,
            other => bail!("Unknown STORAGE_BACKEND value: {}", other),
        };

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
        let cors_origins = lookup("API_CORS_ORIGINS")
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        // Security settings
        let admin_password = lookup("ADMIN_PASSWORD").filter(|password| !password.is_empty());

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            host,
            port,
            storage,
            log_level,
            cors_origins,
            admin_password,
            request_timeout,
        })
    }

    /// Returns the server address as a string, e.g. "127.0.0.1:8080"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
