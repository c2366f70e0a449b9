use std::time::Duration;
use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_STATS_API_URL: &str = "https://leetcode-stats-api.herokuapp.com";
pub const DEFAULT_STATS_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// When unset the server runs against in-memory repositories
    pub database_url: Option<String>,
    pub stats_api_url: String,
    /// Upper bound for a single external stats fetch
    pub stats_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_url: None,
            stats_api_url: DEFAULT_STATS_API_URL.to_string(),
            stats_timeout: Duration::from_secs(DEFAULT_STATS_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Loads `.env` if present, then reads configuration from the process environment
    pub fn from_env() -> Self {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                warn!(error = %err, "Failed to load .env file");
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let stats_timeout = match non_empty("STATS_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(value = %raw, "Invalid STATS_TIMEOUT_SECS, using default");
                    defaults.stats_timeout
                }
            },
            None => defaults.stats_timeout,
        };

        Self {
            bind_addr: non_empty("BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_url: non_empty("DATABASE_URL"),
            stats_api_url: non_empty("STATS_API_URL").unwrap_or(defaults.stats_api_url),
            stats_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn uses_defaults_when_environment_is_empty() {
        let config = config_from(&[]);

        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.stats_api_url, DEFAULT_STATS_API_URL);
        assert_eq!(config.stats_timeout, Duration::from_secs(10));
        assert!(config.database_url.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DATABASE_URL", "postgres://localhost/leetboard"),
            ("STATS_API_URL", "http://stats.local"),
            ("STATS_TIMEOUT_SECS", "3"),
        ]);

        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/leetboard")
        );
        assert_eq!(config.stats_api_url, "http://stats.local");
        assert_eq!(config.stats_timeout, Duration::from_secs(3));
    }

    #[test]
    fn falls_back_on_malformed_timeout() {
        assert_eq!(
            config_from(&[("STATS_TIMEOUT_SECS", "soon")]).stats_timeout,
            Duration::from_secs(DEFAULT_STATS_TIMEOUT_SECS)
        );
        assert_eq!(
            config_from(&[("STATS_TIMEOUT_SECS", "0")]).stats_timeout,
            Duration::from_secs(DEFAULT_STATS_TIMEOUT_SECS)
        );
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        assert!(config_from(&[("DATABASE_URL", "  ")]).database_url.is_none());
    }
}
