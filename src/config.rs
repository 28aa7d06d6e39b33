//! Server configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::services::session::{DEFAULT_SESSION_IDLE_TIMEOUT_SECS, DEFAULT_SESSION_SWEEP_INTERVAL_SECS};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory of front-end assets served for non-API paths.
    pub static_dir: Option<PathBuf>,
    /// Sessions untouched for this long are discarded.
    pub session_idle_timeout: Duration,
    pub session_sweep_interval: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

impl ServerConfig {
    /// - `PORT`: default 3000
    /// - `STATIC_DIR`: unset disables static serving
    /// - `SESSION_IDLE_TIMEOUT_SECS`: default 1800
    /// - `SESSION_SWEEP_INTERVAL_SECS`: default 60, must be non-zero
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse(&lookup, "PORT", DEFAULT_PORT)?;
        let static_dir = lookup("STATIC_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        let idle_secs: u64 = parse(&lookup, "SESSION_IDLE_TIMEOUT_SECS", DEFAULT_SESSION_IDLE_TIMEOUT_SECS)?;
        let sweep_secs: u64 = parse(&lookup, "SESSION_SWEEP_INTERVAL_SECS", DEFAULT_SESSION_SWEEP_INTERVAL_SECS)?;
        if sweep_secs == 0 {
            return Err(ConfigError::Invalid { var: "SESSION_SWEEP_INTERVAL_SECS", value: "0".into() });
        }
        Ok(Self {
            port,
            static_dir,
            session_idle_timeout: Duration::from_secs(idle_secs),
            session_sweep_interval: Duration::from_secs(sweep_secs),
        })
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(value) => value.trim().parse::<T>().map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}
