//! Environment-driven application configuration, read once at startup.

use std::net::SocketAddr;

/// Configuration failures that abort startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("missing required environment variable {name}")]
    Missing {
        /// Variable name.
        name: &'static str,
    },
    /// An environment variable holds an unusable value.
    #[error("invalid value for {name}: {message}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Maximum concurrent database connections.
    pub pool_size: u32,
    /// Bearer-token lifetime in days.
    pub session_ttl_days: i64,
}

fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw.parse().map_err(|err: T::Err| ConfigError::Invalid {
            name,
            message: err.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// `DATABASE_URL` is required; `BIND_ADDR` defaults to `0.0.0.0:5000`,
    /// `DB_POOL_SIZE` to 10, and `SESSION_TTL_DAYS` to 7.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing {
            name: "DATABASE_URL",
        })?;

        let default_addr: SocketAddr = ([0, 0, 0, 0], 5000).into();
        Ok(Self {
            bind_addr: parse_var("BIND_ADDR", default_addr)?,
            database_url,
            pool_size: parse_var("DB_POOL_SIZE", 10)?,
            session_ttl_days: parse_var("SESSION_TTL_DAYS", 7)?,
        })
    }
}
