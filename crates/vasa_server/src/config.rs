//! Environment-driven server configuration.
//!
//! Reads config from env vars (a `.env` file is loaded first by `main`):
//!   VASA_DATABASE_PATH   - SQLite file (default: vasa.sqlite3)
//!   VASA_BIND_ADDR       - listen address (default: 0.0.0.0:5000)
//!   PORT                 - overrides the port of VASA_BIND_ADDR
//!   VASA_POOL_SIZE       - max pooled connections (default: 8)
//!   VASA_POOL_TIMEOUT_MS - pool checkout timeout (default: 5000)
//!   VASA_API_KEY         - expected `x-api-key` value, logged only
//!   VASA_LOG_LEVEL       - trace|debug|info|warn|error
//!   VASA_LOG_DIR         - absolute log directory; stderr when unset

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use vasa_core::{default_log_level, PoolOptions};

const DEFAULT_DATABASE_PATH: &str = "vasa.sqlite3";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub pool: PoolOptions,
    pub api_key: Option<String>,
    pub log_level: String,
    pub log_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid { key, value, reason } => {
                write!(f, "invalid {key}=`{value}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let raw_addr = var("VASA_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let mut bind_addr: SocketAddr = raw_addr.parse().map_err(|err| ConfigError::Invalid {
            key: "VASA_BIND_ADDR",
            value: raw_addr.clone(),
            reason: format!("{err}"),
        })?;
        if let Some(port) = var("PORT") {
            bind_addr.set_port(parse_number("PORT", &port)?);
        }

        let mut pool = PoolOptions::default();
        if let Some(size) = var("VASA_POOL_SIZE") {
            pool.max_size = parse_number("VASA_POOL_SIZE", &size)?;
            if pool.max_size == 0 {
                return Err(ConfigError::Invalid {
                    key: "VASA_POOL_SIZE",
                    value: size,
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        if let Some(timeout) = var("VASA_POOL_TIMEOUT_MS") {
            pool.connection_timeout =
                Duration::from_millis(parse_number("VASA_POOL_TIMEOUT_MS", &timeout)?);
        }

        Ok(Self {
            database_path: PathBuf::from(
                var("VASA_DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string()),
            ),
            bind_addr,
            pool,
            api_key: var("VASA_API_KEY"),
            log_level: var("VASA_LOG_LEVEL").unwrap_or_else(|| default_log_level().to_string()),
            log_dir: var("VASA_LOG_DIR"),
        })
    }
}

fn parse_number<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: Display,
{
    value.parse().map_err(|err: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ServerConfig};
    use std::collections::HashMap;
    use std::time::Duration;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_path.to_str(), Some("vasa.sqlite3"));
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:5000");
        assert_eq!(config.pool.max_size, 8);
        assert_eq!(config.pool.connection_timeout, Duration::from_secs(5));
        assert_eq!(config.api_key, None);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn port_overrides_bind_port() {
        let config = config_from(&[("VASA_BIND_ADDR", "127.0.0.1:8080"), ("PORT", "9000")])
            .unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config_from(&[("VASA_API_KEY", "  "), ("VASA_POOL_SIZE", "3")]).unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.pool.max_size, 3);
    }

    #[test]
    fn invalid_numbers_are_reported_with_their_key() {
        let err = config_from(&[("VASA_POOL_TIMEOUT_MS", "soon")]).unwrap_err();
        let ConfigError::Invalid { key, .. } = err;
        assert_eq!(key, "VASA_POOL_TIMEOUT_MS");

        assert!(config_from(&[("VASA_POOL_SIZE", "0")]).is_err());
        assert!(config_from(&[("VASA_BIND_ADDR", "localhost")]).is_err());
    }
}
