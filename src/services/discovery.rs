//! External token discovery.
//!
//! Looks a query up in the CoinGecko coin index, maps each coin's platform
//! contracts to registered chains and resolves them on-chain.

use std::{collections::HashMap, sync::Arc, time::Duration};

use alloy::primitives::Address;
use async_trait::async_trait;
use futures::future::join_all;
use serde::{de::DeserializeOwned, Deserialize};
use tokio::time::{timeout_at, Instant};

use crate::{
    config::Config,
    error::{AppError, Result},
    ethereum::{constants::platform_chain_id, with_deadline, ChainRegistry},
    services::TokenMetadataFetcher,
    types::{dedup_records, AccountRecord},
};

/// Most index candidates resolved per query.
pub const MAX_DISCOVERY_CANDIDATES: usize = 8;

// ============================================================================
// Token Index Types
// ============================================================================

/// A coin returned by the index search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndexCoin {
    /// Index identifier (e.g., "tether").
    pub id: String,
    /// Coin name.
    #[serde(default)]
    pub name: String,
    /// Coin ticker.
    #[serde(default)]
    pub symbol: String,
    /// Market cap rank, when ranked.
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
}

/// `GET /search` response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    coins: Vec<IndexCoin>,
}

/// `GET /coins/{id}` response, platforms only.
#[derive(Debug, Deserialize)]
struct CoinDetailResponse {
    #[serde(default)]
    platforms: HashMap<String, Option<String>>,
}

/// A searchable coin index with per-platform contract addresses.
#[async_trait]
pub trait TokenIndex: Send + Sync {
    /// Coins matching a name or symbol, best match first.
    async fn search(&self, query: &str) -> Result<Vec<IndexCoin>>;

    /// Contract address per platform id for one coin.
    async fn platforms(&self, coin_id: &str) -> Result<HashMap<String, String>>;
}

// ============================================================================
// CoinGecko Client
// ============================================================================

/// CoinGecko public API client.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_options(
            config.coingecko_api_url.clone(),
            config.coingecko_api_key.clone(),
            config.rpc_timeout,
        )
    }

    /// Create a client with explicit options.
    pub fn with_options(base_url: String, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("multichain-lookup/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string(), api_key })
    }

    /// GET a JSON document from the API.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.client.get(&url).query(query);
        if let Some(key) = &self.api_key {
            request = request.header("x-cg-demo-api-key", key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "{} returned status: {}",
                path,
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Parse(format!("Failed to parse {} response: {}", path, e)))
    }
}

#[async_trait]
impl TokenIndex for CoinGeckoClient {
    async fn search(&self, query: &str) -> Result<Vec<IndexCoin>> {
        let response: SearchResponse = self.get_json("/search", &[("query", query)]).await?;
        Ok(response.coins)
    }

    async fn platforms(&self, coin_id: &str) -> Result<HashMap<String, String>> {
        let path = format!("/coins/{}", coin_id);
        let detail: CoinDetailResponse = self
            .get_json(
                &path,
                &[
                    ("localization", "false"),
                    ("tickers", "false"),
                    ("market_data", "false"),
                    ("community_data", "false"),
                    ("developer_data", "false"),
                    ("sparkline", "false"),
                ],
            )
            .await?;

        Ok(detail
            .platforms
            .into_iter()
            .filter_map(|(platform, address)| address.map(|a| (platform, a)))
            .collect())
    }
}

// ============================================================================
// Discovery
// ============================================================================

/// Resolves free text to token contracts through a [`TokenIndex`].
#[derive(Clone)]
pub struct TokenDiscovery {
    registry: Arc<ChainRegistry>,
    fetcher: TokenMetadataFetcher,
    index: Arc<dyn TokenIndex>,
    timeout: Duration,
}

impl TokenDiscovery {
    /// Create a new discovery service.
    pub fn new(
        registry: Arc<ChainRegistry>,
        fetcher: TokenMetadataFetcher,
        index: Arc<dyn TokenIndex>,
        timeout: Duration,
    ) -> Self {
        Self { registry, fetcher, index, timeout }
    }

    /// Token identity records for `query`. Never fails: index errors yield
    /// an empty list, and candidates that are unresolvable or unfinished at
    /// `deadline` are dropped.
    pub async fn discover(&self, query: &str, deadline: Instant) -> Vec<AccountRecord> {
        let search = timeout_at(deadline, with_deadline(self.timeout, self.index.search(query)));
        let coins = match search.await.map_err(AppError::from).and_then(|result| result) {
            Ok(coins) => coins,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Token index search failed");
                return Vec::new();
            }
        };

        let candidates = coins.into_iter().take(MAX_DISCOVERY_CANDIDATES);
        let resolved = join_all(candidates.map(|coin| self.resolve_coin(coin, deadline))).await;
        let records = dedup_records(resolved.into_iter().flatten().collect());

        tracing::info!(query = %query, records = records.len(), "Token discovery finished");

        records
    }

    async fn resolve_coin(&self, coin: IndexCoin, deadline: Instant) -> Vec<AccountRecord> {
        let detail = timeout_at(deadline, with_deadline(self.timeout, self.index.platforms(&coin.id)));
        let platforms = match detail.await.map_err(AppError::from).and_then(|result| result) {
            Ok(platforms) => platforms,
            Err(e) => {
                tracing::debug!(coin = %coin.id, error = %e, "Coin detail unavailable");
                return Vec::new();
            }
        };

        let targets = platform_targets(&self.registry, &platforms);
        let fetches = targets
            .iter()
            .map(|(chain_id, address)| timeout_at(deadline, self.fetcher.fetch(*address, *chain_id)));
        let results = join_all(fetches).await;

        let cut_off = results.iter().filter(|result| result.is_err()).count();
        if cut_off > 0 {
            tracing::warn!(coin = %coin.id, cut_off, "Token reads cut off by search deadline");
        }

        results
            .into_iter()
            .filter_map(|result| result.ok().flatten())
            .map(AccountRecord::token_identity)
            .collect()
    }
}

/// `(chain_id, address)` pairs for the platforms that map to registered
/// chains, in registry order.
///
/// Unknown platforms, unregistered chains and empty or malformed addresses
/// are skipped.
pub fn platform_targets(
    registry: &ChainRegistry,
    platforms: &HashMap<String, String>,
) -> Vec<(u64, Address)> {
    let mut targets: Vec<(usize, u64, Address)> = platforms
        .iter()
        .filter_map(|(platform, address)| {
            let chain_id = platform_chain_id(platform)?;
            let position = registry.position(chain_id)?;
            let address = address.trim().parse::<Address>().ok()?;
            Some((position, chain_id, address))
        })
        .collect();

    targets.sort_by_key(|(position, _, _)| *position);
    targets.into_iter().map(|(_, chain_id, address)| (chain_id, address)).collect()
}
