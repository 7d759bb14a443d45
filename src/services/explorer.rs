//! Unified explorer: the library's public search surface.
//!
//! Wires the chain registry, clients and search services together and
//! routes free-text queries through [`Explorer::smart_search`].

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::time::Instant;

use crate::{
    config::{Config, SearchMode, DEFAULT_RPC_TIMEOUT, DEFAULT_SEARCH_TIMEOUT},
    error::{AppError, Result},
    ethereum::{ChainClients, ChainDescriptor, ChainRegistry},
    services::{
        classifier::{classify_query, QueryKind},
        CoinGeckoClient, CuratedTokens, IndexCoin, SearchService, TokenDiscovery, TokenIndex,
        TokenMetadataFetcher,
    },
    types::{SearchOutcome, SearchStrategy},
};

/// Multi-chain address and token search.
///
/// Cheap to clone; all clones share the same registry and client handles.
#[derive(Clone)]
pub struct Explorer {
    registry: Arc<ChainRegistry>,
    search: SearchService,
    discovery: TokenDiscovery,
    mode: SearchMode,
    search_timeout: Duration,
}

impl Explorer {
    /// Create an explorer over the built-in chains using real RPC endpoints
    /// and the CoinGecko index.
    ///
    /// Note: No network calls are made here.
    pub fn new(config: &Config) -> Result<Self> {
        let registry = ChainRegistry::builtin().with_rpc_overrides(&config.rpc_overrides);
        let clients = ChainClients::from_registry(&registry)?;
        let index = CoinGeckoClient::new(config)?;

        Ok(Self::builder(registry, clients)
            .token_index(Arc::new(index))
            .search_mode(config.search_mode)
            .rpc_timeout(config.rpc_timeout)
            .search_timeout(config.search_timeout)
            .build())
    }

    /// Start building an explorer from explicit collaborators.
    pub fn builder(registry: ChainRegistry, clients: ChainClients) -> ExplorerBuilder {
        ExplorerBuilder::new(registry, clients)
    }

    /// Search anything: an address, a token symbol or a token name.
    ///
    /// A syntactically valid address is always searched as an address.
    /// Other text goes through the configured [`SearchMode`]. Blank queries
    /// return an unmatched outcome without network calls.
    pub async fn smart_search(&self, query: &str) -> SearchOutcome {
        match classify_query(query) {
            QueryKind::Address(_) => self.search_by_address(query.trim()).await,
            QueryKind::Empty => SearchOutcome::unmatched(query, SearchStrategy::NameOrSymbol),
            QueryKind::Text { text, symbol_like } => {
                tracing::debug!(query = %text, symbol_like, mode = ?self.mode, "Text query");
                let deadline = self.deadline();
                match self.mode {
                    SearchMode::Curated => self.search.search_by_name_or_symbol(text, deadline).await,
                    SearchMode::External => {
                        let records = self.discovery.discover(text, deadline).await;
                        SearchOutcome::new(text, SearchStrategy::NameOrSymbol, records)
                    }
                }
            }
        }
    }

    /// Look up an address on every supported chain.
    pub async fn search_by_address(&self, address: &str) -> SearchOutcome {
        self.search.search_by_address(address, self.deadline()).await
    }

    /// Curated tokens whose name contains `name` (case-insensitive).
    pub async fn search_by_token_name(&self, name: &str) -> SearchOutcome {
        self.search.search_by_name(name, self.deadline()).await
    }

    /// Curated tokens whose symbol equals `symbol` (case-insensitive).
    pub async fn search_by_token_symbol(&self, symbol: &str) -> SearchOutcome {
        self.search.search_by_symbol(symbol, self.deadline()).await
    }

    /// Supported chains, in search order.
    pub fn supported_chains(&self) -> &[ChainDescriptor] {
        self.registry.chains()
    }

    /// Look up a supported chain by id.
    pub fn chain_by_id(&self, chain_id: u64) -> Option<&ChainDescriptor> {
        self.registry.by_id(chain_id)
    }

    /// Look up a supported chain by name (case-insensitive).
    pub fn chain_by_name(&self, name: &str) -> Option<&ChainDescriptor> {
        self.registry.by_name(name)
    }

    /// The chain registry.
    pub fn registry(&self) -> &ChainRegistry {
        &self.registry
    }

    /// Policy used for free-text queries.
    pub fn search_mode(&self) -> SearchMode {
        self.mode
    }

    /// Instant by which every branch of a search started now must finish.
    /// Branches still running then contribute nothing.
    fn deadline(&self) -> Instant {
        Instant::now() + self.search_timeout
    }
}

/// Builder for [`Explorer`].
pub struct ExplorerBuilder {
    registry: ChainRegistry,
    clients: ChainClients,
    curated: CuratedTokens,
    index: Option<Arc<dyn TokenIndex>>,
    mode: SearchMode,
    rpc_timeout: Duration,
    search_timeout: Duration,
}

impl ExplorerBuilder {
    fn new(registry: ChainRegistry, clients: ChainClients) -> Self {
        Self {
            registry,
            clients,
            curated: CuratedTokens::builtin(),
            index: None,
            mode: SearchMode::default(),
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
        }
    }

    /// Curated token lists (default: built-in lists).
    pub fn curated_tokens(mut self, curated: CuratedTokens) -> Self {
        self.curated = curated;
        self
    }

    /// External token index (default: none, discovery finds nothing).
    pub fn token_index(mut self, index: Arc<dyn TokenIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Free-text policy (default: curated).
    pub fn search_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Per-call deadline.
    pub fn rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = timeout;
        self
    }

    /// Deadline shared by every branch of one search.
    pub fn search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    /// Build the explorer.
    pub fn build(self) -> Explorer {
        let registry = Arc::new(self.registry);
        let clients = Arc::new(self.clients);

        let fetcher = TokenMetadataFetcher::new(registry.clone(), clients.clone(), self.rpc_timeout);
        let search = SearchService::new(
            registry.clone(),
            clients,
            fetcher.clone(),
            Arc::new(self.curated),
            self.rpc_timeout,
        );
        let index = self.index.unwrap_or_else(|| Arc::new(NoIndex));
        let discovery = TokenDiscovery::new(registry.clone(), fetcher, index, self.rpc_timeout);

        tracing::info!(
            chains = registry.len(),
            mode = ?self.mode,
            "Explorer initialized"
        );

        Explorer { registry, search, discovery, mode: self.mode, search_timeout: self.search_timeout }
    }
}

/// Index used when none is configured; it knows no coins.
struct NoIndex;

#[async_trait]
impl TokenIndex for NoIndex {
    async fn search(&self, _query: &str) -> Result<Vec<IndexCoin>> {
        Ok(Vec::new())
    }

    async fn platforms(&self, coin_id: &str) -> Result<HashMap<String, String>> {
        Err(AppError::ExternalApi(format!("no token index configured for {}", coin_id)))
    }
}
