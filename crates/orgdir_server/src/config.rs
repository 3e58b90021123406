//! Server configuration read from the process environment.
//!
//! # Responsibility
//! - Turn `ORGDIR_*` variables into one validated `ServerConfig` value.
//! - Keep the API secret out of `Debug` output and logs.
//!
//! # Invariants
//! - A config value is only produced when the API key is present and non-blank.

use orgdir_core::default_log_level;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

pub const ENV_BIND: &str = "ORGDIR_BIND";
pub const ENV_DB_PATH: &str = "ORGDIR_DB_PATH";
pub const ENV_API_KEY: &str = "ORGDIR_API_KEY";
pub const ENV_LOG_LEVEL: &str = "ORGDIR_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ORGDIR_LOG_DIR";

const DEFAULT_BIND: &str = "127.0.0.1:8000";
const DEFAULT_DB_PATH: &str = "organizations.db";

#[derive(Debug)]
pub enum ConfigError {
    MissingApiKey,
    InvalidBindAddress {
        value: String,
        source: AddrParseError,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "{ENV_API_KEY} must be set to a non-blank value"),
            Self::InvalidBindAddress { value, source } => {
                write!(f, "invalid {ENV_BIND} `{value}`: {source}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingApiKey => None,
            Self::InvalidBindAddress { source, .. } => Some(source),
        }
    }
}

/// Shared secret expected in the `X-API-Key` header.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Compares without short-circuiting on the first differing byte.
    pub fn matches(&self, candidate: &str) -> bool {
        let expected = self.0.as_bytes();
        let candidate = candidate.as_bytes();
        if expected.len() != candidate.len() {
            return false;
        }
        expected
            .iter()
            .zip(candidate)
            .fold(0u8, |diff, (left, right)| diff | (left ^ right))
            == 0
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    pub api_key: ApiKey,
    pub log_level: String,
    /// `None` logs to stderr.
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds config from an arbitrary variable source. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind = read(ENV_BIND).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBindAddress {
                value: bind.clone(),
                source,
            })?;
        let api_key = ApiKey::new(read(ENV_API_KEY).ok_or(ConfigError::MissingApiKey)?)?;

        Ok(Self {
            bind_addr,
            db_path: PathBuf::from(read(ENV_DB_PATH).unwrap_or_else(|| DEFAULT_DB_PATH.to_string())),
            api_key,
            log_level: read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(ENV_LOG_DIR),
        })
    }
}
