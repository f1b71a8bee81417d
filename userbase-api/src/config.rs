/// Configuration management for the API server
///
/// Configuration is read from environment variables; a `.env` file in the
/// working directory is loaded first when present.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `SECRET_KEY`: Application secret (default: a development placeholder)
/// - `RUST_LOG`: Log filter (read by `main`, not stored here)
///
/// # Example
///
/// ```no_run
/// use userbase_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use std::env;
use userbase_shared::db::pool::DatabaseConfig as PoolConfig;

/// Placeholder used when `SECRET_KEY` is unset
pub const DEV_SECRET_KEY: &str = "change-me";

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Application secrets
    pub security: SecurityConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Application secrets
///
/// `secret_key` is loaded so deployments can set it ahead of features that sign
/// data; no current route reads it.
#[derive(Clone)]
pub struct SecurityConfig {
    pub secret_key: String,
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl SecurityConfig {
    /// True when the development placeholder is in use
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEV_SECRET_KEY
    }
}

impl Config {
    /// Loads configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a numeric variable
    /// does not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("API_PORT must be a port number: {}", e))?;

        let url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("DATABASE_MAX_CONNECTIONS must be a positive integer: {}", e))?;

        if max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        let secret_key = lookup("SECRET_KEY").unwrap_or_else(|| DEV_SECRET_KEY.to_string());

        Ok(Self {
            api: ApiConfig { host, port },
            database: DatabaseConfig {
                url,
                max_connections,
            },
            security: SecurityConfig { secret_key },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Pool settings derived from this configuration
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            max_connections: self.database.max_connections,
            ..PoolConfig::from_url(self.database.url.clone())
        }
    }
}
