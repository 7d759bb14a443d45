//! Ethereum RPC clients.

use std::{collections::HashMap, future::Future, sync::Arc, time::Duration};

use alloy::{
    network::Ethereum,
    primitives::{Address, Bytes, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;

use crate::{
    error::{AppError, Result},
    ethereum::chains::ChainRegistry,
};

/// Type alias for the HTTP provider.
pub type HttpProvider = RootProvider<Ethereum>;

/// Read-only RPC capabilities the search engine needs from a chain.
///
/// Implemented by [`EthereumClient`] for real endpoints; tests provide
/// in-memory implementations.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Deployed bytecode at `address` (empty for plain accounts).
    async fn get_code(&self, address: Address) -> Result<Bytes>;

    /// Native balance of `address` in the smallest unit.
    async fn get_balance(&self, address: Address) -> Result<U256>;

    /// `eth_call` against `to` with ABI-encoded `data`.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes>;
}

/// Ethereum RPC client wrapper over an alloy HTTP provider.
#[derive(Clone)]
pub struct EthereumClient {
    /// The underlying provider.
    provider: Arc<HttpProvider>,
    /// RPC URL for logging.
    rpc_url: String,
}

impl EthereumClient {
    /// Create a new Ethereum client.
    ///
    /// Note: This does NOT make any network calls. The connection is
    /// established lazily when the first operation is performed.
    pub fn new(rpc_url: &str) -> Result<Self> {
        let url = rpc_url
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid RPC URL: {}", rpc_url)))?;

        let provider = ProviderBuilder::new().connect_http(url).root().clone();

        tracing::debug!(rpc_url = %rpc_url, "Ethereum client created (lazy initialization)");

        Ok(Self { provider: Arc::new(provider), rpc_url: rpc_url.to_string() })
    }

    /// RPC endpoint this client talks to.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

#[async_trait]
impl ChainRpc for EthereumClient {
    async fn get_code(&self, address: Address) -> Result<Bytes> {
        let code = self.provider.get_code_at(address).await?;
        Ok(code)
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        let balance = self.provider.get_balance(address).await?;
        Ok(balance)
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let tx = TransactionRequest::default().to(to).input(data.into());
        let result = self.provider.call(tx).await?;
        Ok(result)
    }
}

/// Await `fut`, failing with `AppError::Timeout` once `deadline` passes.
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(deadline, fut).await?
}

/// Per-chain client handles, built once and shared by every search.
#[derive(Clone, Default)]
pub struct ChainClients {
    clients: HashMap<u64, Arc<dyn ChainRpc>>,
}

impl ChainClients {
    /// Create an empty client map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an [`EthereumClient`] for every chain in the registry.
    ///
    /// # Errors
    /// Returns `AppError::Config` if a chain's RPC URL cannot be parsed.
    pub fn from_registry(registry: &ChainRegistry) -> Result<Self> {
        let mut clients = Self::new();
        for chain in registry.chains() {
            let client = EthereumClient::new(&chain.rpc_url)?;
            clients.insert(chain.id, Arc::new(client));
        }
        tracing::info!(chains = clients.len(), "Chain clients created");
        Ok(clients)
    }

    /// Register (or replace) the client for a chain.
    pub fn insert(&mut self, chain_id: u64, client: Arc<dyn ChainRpc>) {
        self.clients.insert(chain_id, client);
    }

    /// Client for a chain, if registered.
    pub fn get(&self, chain_id: u64) -> Option<Arc<dyn ChainRpc>> {
        self.clients.get(&chain_id).cloned()
    }

    /// Number of registered clients.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether no client is registered.
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl std::fmt::Debug for ChainClients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.clients.keys().copied().collect();
        ids.sort_unstable();
        f.debug_struct("ChainClients").field("chain_ids", &ids).finish()
    }
}
