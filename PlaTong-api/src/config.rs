use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors, reported once at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("STATS_URL is not a valid URL: {0}")]
    StatsUrl(#[from] url::ParseError),
}

/// Server settings read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    /// Reported by the health endpoint
    pub environment: String,
    /// Remote stats endpoint; without it the home page always shows the default figures
    pub stats_url: Option<Url>,
    pub stats_timeout: Duration,
    /// Site content file replacing the bundled content
    pub content_path: Option<PathBuf>,
    /// Most tutorial sessions kept alive at once
    pub session_limit: usize,
    /// Untouched sessions are closed after this long
    pub session_idle_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            environment: "development".to_string(),
            stats_url: None,
            stats_timeout: Duration::from_secs(5),
            content_path: None,
            session_limit: 1000,
            session_idle_timeout: Duration::from_secs(30 * 60),
        }
    }
}

impl AppConfig {
    /// Read the configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(value) => parse(&value, "PORT", "a port number")?,
            None => defaults.port,
        };

        let stats_url = get("STATS_URL").map(|value| Url::parse(&value)).transpose()?;

        let stats_timeout = match get("STATS_TIMEOUT_SECS") {
            Some(value) => {
                let secs: u64 = parse(&value, "STATS_TIMEOUT_SECS", "a positive number of seconds")?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        key: "STATS_TIMEOUT_SECS",
                        expected: "a positive number of seconds",
                        value,
                    });
                }
                Duration::from_secs(secs)
            }
            None => defaults.stats_timeout,
        };

        let session_limit = match get("SESSION_LIMIT") {
            Some(value) => {
                let limit: usize = parse(&value, "SESSION_LIMIT", "a positive integer")?;
                if limit == 0 {
                    return Err(ConfigError::Invalid {
                        key: "SESSION_LIMIT",
                        expected: "a positive integer",
                        value,
                    });
                }
                limit
            }
            None => defaults.session_limit,
        };

        let session_idle_timeout = match get("SESSION_IDLE_SECS") {
            Some(value) => {
                let secs: u64 = parse(&value, "SESSION_IDLE_SECS", "a positive number of seconds")?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        key: "SESSION_IDLE_SECS",
                        expected: "a positive number of seconds",
                        value,
                    });
                }
                Duration::from_secs(secs)
            }
            None => defaults.session_idle_timeout,
        };

        Ok(Self {
            port,
            environment: get("APP_ENV").unwrap_or(defaults.environment),
            stats_url,
            stats_timeout,
            content_path: get("CONTENT_PATH").map(PathBuf::from),
            session_limit,
            session_idle_timeout,
        })
    }
}

fn parse<T: std::str::FromStr>(
    value: &str,
    key: &'static str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        expected,
        value: value.to_string(),
    })
}
