use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

const DEFAULT_RESULTS_SERVICE_URL: &str = "http://localhost:8080";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the results service, without the `/api/results` path
    pub results_service_url: String,
    pub bind_addr: SocketAddr,
    pub fetch_timeout: Duration,
}

impl Config {
    /// Reads configuration from the process environment, loading `.env`
    /// first when one exists
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let results_service_url = lookup("RESULTS_SERVICE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RESULTS_SERVICE_URL.to_string());

        let raw_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = raw_addr.parse().map_err(|err: std::net::AddrParseError| {
            ConfigError::Invalid {
                key: "BIND_ADDR",
                value: raw_addr.clone(),
                reason: err.to_string(),
            }
        })?;

        let fetch_timeout_secs = match lookup("FETCH_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        key: "FETCH_TIMEOUT_SECS",
                        value: raw,
                        reason: "must be at least 1".to_string(),
                    })
                }
                Err(err) => {
                    return Err(ConfigError::Invalid {
                        key: "FETCH_TIMEOUT_SECS",
                        value: raw,
                        reason: err.to_string(),
                    })
                }
            },
            None => DEFAULT_FETCH_TIMEOUT_SECS,
        };

        Ok(Self {
            results_service_url,
            bind_addr,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn uses_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.results_service_url, "http://localhost:8080");
        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("RESULTS_SERVICE_URL", "http://results:9000"),
            ("BIND_ADDR", "127.0.0.1:4000"),
            ("FETCH_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.results_service_url, "http://results:9000");
        assert_eq!(config.bind_addr.port(), 4000);
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
    }

    #[test]
    fn rejects_bad_bind_addr() {
        let err = Config::from_lookup(lookup_from(&[("BIND_ADDR", "not-an-addr")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BIND_ADDR", .. }));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = Config::from_lookup(lookup_from(&[("FETCH_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "FETCH_TIMEOUT_SECS",
                ..
            }
        ));
    }

    #[test]
    fn blank_url_falls_back_to_default() {
        let config = Config::from_lookup(lookup_from(&[("RESULTS_SERVICE_URL", "  ")])).unwrap();
        assert_eq!(config.results_service_url, "http://localhost:8080");
    }
}
