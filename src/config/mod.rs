//! Configuration management module.
//!
//! Handles loading configuration from environment variables.

use std::{collections::HashMap, env, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Default CoinGecko API base URL.
pub const DEFAULT_COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Default deadline for a single outbound call.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// Default deadline for a whole search operation.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Prefix of the per-chain RPC override variables (`RPC_URL_<CHAIN_ID>`).
const RPC_URL_PREFIX: &str = "RPC_URL_";

/// How `smart_search` resolves free-text queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Symbol and name search over the curated per-chain token lists.
    #[default]
    Curated,
    /// Token discovery through the external coin index.
    External,
}

impl std::str::FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "curated" => Ok(SearchMode::Curated),
            "external" => Ok(SearchMode::External),
            _ => Err(format!("Invalid search mode: {}", s)),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Logging level (default: info).
    pub log_level: String,
    /// Policy for free-text queries.
    pub search_mode: SearchMode,
    /// Deadline applied to every RPC and HTTP call.
    pub rpc_timeout: Duration,
    /// Deadline applied to a whole search operation.
    pub search_timeout: Duration,
    /// CoinGecko API base URL.
    pub coingecko_api_url: String,
    /// Optional CoinGecko demo API key.
    pub coingecko_api_key: Option<String>,
    /// RPC endpoint overrides keyed by chain id.
    pub rpc_overrides: HashMap<u64, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            search_mode: SearchMode::default(),
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
            coingecko_api_url: DEFAULT_COINGECKO_API_URL.to_string(),
            coingecko_api_key: None,
            rpc_overrides: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `LOG_LEVEL`: Logging level (default: info)
    /// - `LOOKUP_SEARCH_MODE`: `curated` or `external` (default: curated)
    /// - `LOOKUP_RPC_TIMEOUT_SECS`: per-call deadline (default: 10)
    /// - `LOOKUP_SEARCH_TIMEOUT_SECS`: whole-search deadline (default: 30)
    /// - `COINGECKO_API_URL`, `COINGECKO_API_KEY`
    /// - `RPC_URL_<CHAIN_ID>`: RPC endpoint override for one chain
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut config = Self::from_lookup(|key| env::var(key).ok())?;

        for (key, value) in env::vars() {
            if let Some(chain_id) = key.strip_prefix(RPC_URL_PREFIX) {
                let chain_id: u64 = chain_id.parse().map_err(|_| {
                    AppError::Config(format!("{} must end with a numeric chain id", key))
                })?;
                config.rpc_overrides.insert(chain_id, value);
            }
        }

        Ok(config)
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);

        let search_mode = match lookup("LOOKUP_SEARCH_MODE") {
            Some(raw) => raw.parse::<SearchMode>().map_err(AppError::Config)?,
            None => defaults.search_mode,
        };

        let rpc_timeout =
            parse_secs(lookup("LOOKUP_RPC_TIMEOUT_SECS"), "LOOKUP_RPC_TIMEOUT_SECS")?
                .unwrap_or(defaults.rpc_timeout);

        let search_timeout =
            parse_secs(lookup("LOOKUP_SEARCH_TIMEOUT_SECS"), "LOOKUP_SEARCH_TIMEOUT_SECS")?
                .unwrap_or(defaults.search_timeout);

        if search_timeout <= rpc_timeout {
            return Err(AppError::Config(format!(
                "LOOKUP_SEARCH_TIMEOUT_SECS ({}s) must be greater than LOOKUP_RPC_TIMEOUT_SECS ({}s)",
                search_timeout.as_secs(),
                rpc_timeout.as_secs()
            )));
        }

        let coingecko_api_url = lookup("COINGECKO_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.coingecko_api_url);

        let coingecko_api_key = lookup("COINGECKO_API_KEY").filter(|key| !key.is_empty());

        Ok(Self {
            log_level,
            search_mode,
            rpc_timeout,
            search_timeout,
            coingecko_api_url,
            coingecko_api_key,
            rpc_overrides: HashMap::new(),
        })
    }
}

/// Parse an optional positive number of seconds.
fn parse_secs(raw: Option<String>, name: &str) -> Result<Option<Duration>, AppError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} must be a whole number of seconds", name)))?;

    if secs == 0 {
        return Err(AppError::Config(format!("{} must be greater than zero", name)));
    }

    Ok(Some(Duration::from_secs(secs)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.search_mode, SearchMode::Curated);
        assert_eq!(config.rpc_timeout, DEFAULT_RPC_TIMEOUT);
        assert_eq!(config.search_timeout, DEFAULT_SEARCH_TIMEOUT);
        assert_eq!(config.coingecko_api_url, DEFAULT_COINGECKO_API_URL);
        assert!(config.coingecko_api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("LOG_LEVEL", "debug"),
            ("LOOKUP_SEARCH_MODE", "External"),
            ("LOOKUP_RPC_TIMEOUT_SECS", "3"),
            ("LOOKUP_SEARCH_TIMEOUT_SECS", "12"),
            ("COINGECKO_API_URL", "https://pro-api.coingecko.com/api/v3/"),
            ("COINGECKO_API_KEY", "demo-key"),
        ]))
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.search_mode, SearchMode::External);
        assert_eq!(config.rpc_timeout, Duration::from_secs(3));
        assert_eq!(config.search_timeout, Duration::from_secs(12));
        assert_eq!(config.coingecko_api_url, "https://pro-api.coingecko.com/api/v3");
        assert_eq!(config.coingecko_api_key.as_deref(), Some("demo-key"));
    }

    #[test]
    fn test_invalid_search_mode() {
        let result = Config::from_lookup(lookup_from(&[("LOOKUP_SEARCH_MODE", "heuristic")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_timeouts() {
        let result = Config::from_lookup(lookup_from(&[("LOOKUP_RPC_TIMEOUT_SECS", "soon")]));
        assert!(matches!(result, Err(AppError::Config(_))));

        let result = Config::from_lookup(lookup_from(&[("LOOKUP_SEARCH_TIMEOUT_SECS", "0")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_search_timeout_must_exceed_rpc_timeout() {
        let result = Config::from_lookup(lookup_from(&[
            ("LOOKUP_RPC_TIMEOUT_SECS", "30"),
            ("LOOKUP_SEARCH_TIMEOUT_SECS", "30"),
        ]));
        assert!(matches!(result, Err(AppError::Config(_))));

        // Raising only the per-call deadline past the default search deadline
        let result = Config::from_lookup(lookup_from(&[("LOOKUP_RPC_TIMEOUT_SECS", "45")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_empty_api_key_is_ignored() {
        let config = Config::from_lookup(lookup_from(&[("COINGECKO_API_KEY", "")])).unwrap();
        assert!(config.coingecko_api_key.is_none());
    }

    #[test]
    fn test_search_mode_serialization() {
        assert_eq!(serde_json::to_string(&SearchMode::Curated).unwrap(), "\"curated\"");
        assert_eq!(serde_json::to_string(&SearchMode::External).unwrap(), "\"external\"");
    }
}
