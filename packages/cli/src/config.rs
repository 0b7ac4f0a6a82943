// ABOUTME: Server configuration loaded from environment variables
// ABOUTME: Prefixed TRACKER_* names win over the legacy PORT and CORS_ORIGIN fallbacks

use std::env;
use std::net::IpAddr;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

use tracker_config::{
    CORS_ORIGIN, DEFAULT_API_HOST, DEFAULT_API_PORT, DEFAULT_CORS_ORIGIN,
    DEFAULT_DB_MAX_CONNECTIONS, PORT, TRACKER_API_HOST, TRACKER_API_PORT, TRACKER_CORS_ORIGIN,
    TRACKER_DATABASE_PATH, TRACKER_DB_MAX_CONNECTIONS,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid host address: {0}")]
    InvalidHost(String),
    #[error("Invalid database connection limit: {0}")]
    InvalidMaxConnections(String),
    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub cors_origin: String,
    /// `None` selects the default file under the user's home directory
    pub database_path: Option<PathBuf>,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(TRACKER_API_PORT).or_else(|| lookup(PORT)) {
            Some(raw) => raw.trim().parse::<u16>()?,
            None => DEFAULT_API_PORT,
        };
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let host_str = lookup(TRACKER_API_HOST).unwrap_or_else(|| DEFAULT_API_HOST.to_string());
        let host = host_str
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(host_str.clone()))?;

        let cors_origin = lookup(TRACKER_CORS_ORIGIN)
            .or_else(|| lookup(CORS_ORIGIN))
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        let database_path = lookup(TRACKER_DATABASE_PATH)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let db_max_connections = match lookup(TRACKER_DB_MAX_CONNECTIONS) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidMaxConnections(raw)),
            },
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        Ok(Config {
            host,
            port,
            cors_origin,
            database_path,
            db_max_connections,
        })
    }

    /// Override the port, e.g. from a command-line flag
    pub fn with_port(mut self, port: u16) -> Result<Self, ConfigError> {
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }
        self.port = port;
        Ok(self)
    }
}
