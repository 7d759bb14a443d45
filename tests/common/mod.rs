//! Common utilities for integration tests.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::{SolCall, SolValue},
};
use async_trait::async_trait;

use multichain_lookup::{
    ethereum::{contracts::IERC20, ChainClients, ChainRpc},
    services::{CuratedTokens, IndexCoin, TokenIndex},
    AppError, ChainDescriptor, ChainRegistry, Config, Explorer, ExplorerBuilder, LookupServer,
    NativeCurrency, Result, SearchMode,
};

/// Chain ids of the test registry, in registry order.
pub const CHAIN_A: u64 = 1;
pub const CHAIN_B: u64 = 56;
pub const CHAIN_C: u64 = 137;

pub const USDT: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";
pub const USDT_C: &str = "0xc2132D05D31c914a87C6611C10748AEb04B58e8F";
pub const DAI: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";
pub const WALLET: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";

pub fn addr(s: &str) -> Address {
    s.parse().unwrap()
}

pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
}

fn chain(id: u64, name: &str, symbol: &str) -> ChainDescriptor {
    ChainDescriptor {
        id,
        name: name.to_string(),
        rpc_url: format!("http://localhost:{}", id),
        explorer_url: format!("https://explorer-{}.test", id),
        native_currency: NativeCurrency {
            name: symbol.to_string(),
            symbol: symbol.to_string(),
            decimals: 18,
        },
    }
}

/// Three chains whose ids match real CoinGecko platforms.
pub fn test_registry() -> ChainRegistry {
    ChainRegistry::new(vec![
        chain(CHAIN_A, "Chain A", "AAA"),
        chain(CHAIN_B, "Chain B", "BBB"),
        chain(CHAIN_C, "Chain C", "CCC"),
    ])
    .unwrap()
}

// ============================================================================
// Mock chain
// ============================================================================

#[derive(Clone)]
struct MockToken {
    name: String,
    symbol: String,
    decimals: u8,
    total_supply: U256,
}

/// In-memory chain. Unknown addresses are empty accounts with zero balance.
#[derive(Default)]
pub struct MockRpc {
    code: HashMap<Address, Bytes>,
    balances: HashMap<Address, U256>,
    tokens: HashMap<Address, MockToken>,
    failing: bool,
    hanging: bool,
    calls: AtomicUsize,
}

impl MockRpc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request fails with a transport error.
    pub fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }

    /// Every request never completes.
    pub fn hanging() -> Self {
        Self { hanging: true, ..Self::default() }
    }

    pub fn with_balance(mut self, address: &str, balance: U256) -> Self {
        self.balances.insert(addr(address), balance);
        self
    }

    /// Deployed bytecode without ERC20 behavior.
    pub fn with_contract(mut self, address: &str) -> Self {
        self.code.insert(addr(address), Bytes::from_static(&[0x60, 0x80, 0x60, 0x40, 0x52]));
        self
    }

    /// Deployed ERC20 token.
    pub fn with_token(
        mut self,
        address: &str,
        name: &str,
        symbol: &str,
        decimals: u8,
        total_supply: u64,
    ) -> Self {
        self = self.with_contract(address);
        self.tokens.insert(
            addr(address),
            MockToken {
                name: name.to_string(),
                symbol: symbol.to_string(),
                decimals,
                total_supply: U256::from(total_supply),
            },
        );
        self
    }

    /// Number of requests received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hanging {
            std::future::pending::<()>().await;
        }
        if self.failing {
            return Err(AppError::Transport("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ChainRpc for MockRpc {
    async fn get_code(&self, address: Address) -> Result<Bytes> {
        self.enter().await?;
        Ok(self.code.get(&address).cloned().unwrap_or_default())
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        self.enter().await?;
        Ok(self.balances.get(&address).copied().unwrap_or_default())
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        self.enter().await?;

        let token = self.tokens.get(&to).ok_or_else(|| AppError::Rpc("execution reverted".into()))?;
        let selector = &data[..4];

        let encoded = if selector == IERC20::nameCall::SELECTOR {
            token.name.clone().abi_encode()
        } else if selector == IERC20::symbolCall::SELECTOR {
            token.symbol.clone().abi_encode()
        } else if selector == IERC20::decimalsCall::SELECTOR {
            // uint8 is ABI-encoded as a full word
            U256::from(token.decimals).abi_encode()
        } else if selector == IERC20::totalSupplyCall::SELECTOR {
            token.total_supply.abi_encode()
        } else {
            return Err(AppError::Rpc("execution reverted".into()));
        };

        Ok(encoded.into())
    }
}

/// Client map over the given mocks, keyed by chain id.
pub fn clients(mocks: &[(u64, Arc<MockRpc>)]) -> ChainClients {
    let mut clients = ChainClients::new();
    for (chain_id, mock) in mocks {
        clients.insert(*chain_id, mock.clone());
    }
    clients
}

// ============================================================================
// Mock token index
// ============================================================================

/// In-memory coin index.
#[derive(Default)]
pub struct MockIndex {
    coins: Vec<IndexCoin>,
    platforms: HashMap<String, HashMap<String, String>>,
    failing: bool,
    calls: AtomicUsize,
}

impl MockIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request fails.
    pub fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }

    pub fn with_coin(mut self, id: &str, symbol: &str, platforms: &[(&str, &str)]) -> Self {
        self.coins.push(IndexCoin {
            id: id.to_string(),
            name: id.to_string(),
            symbol: symbol.to_string(),
            market_cap_rank: None,
        });
        self.platforms.insert(
            id.to_string(),
            platforms.iter().map(|(p, a)| (p.to_string(), a.to_string())).collect(),
        );
        self
    }

    /// Number of requests received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenIndex for MockIndex {
    async fn search(&self, _query: &str) -> Result<Vec<IndexCoin>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(AppError::ExternalApi("/search returned status: 429".into()));
        }
        Ok(self.coins.clone())
    }

    async fn platforms(&self, coin_id: &str) -> Result<HashMap<String, String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.platforms
            .get(coin_id)
            .cloned()
            .ok_or_else(|| AppError::ExternalApi(format!("/coins/{} returned status: 404", coin_id)))
    }
}

// ============================================================================
// Explorer helpers
// ============================================================================

/// Explorer over the test registry with short deadlines and no curated tokens.
pub fn explorer_builder(clients: ChainClients) -> ExplorerBuilder {
    Explorer::builder(test_registry(), clients)
        .curated_tokens(CuratedTokens::new())
        .rpc_timeout(Duration::from_millis(200))
        .search_timeout(Duration::from_secs(5))
}

/// Curated lists used by token search tests.
pub fn test_curated() -> CuratedTokens {
    CuratedTokens::new()
        .with_tokens(CHAIN_A, [addr(USDT), addr(DAI)])
        .with_tokens(CHAIN_C, [addr(USDT_C)])
}

/// Chains with USDT on A and C, DAI on A, and nothing on B.
pub fn token_chains() -> (Arc<MockRpc>, Arc<MockRpc>, Arc<MockRpc>) {
    let a = MockRpc::new()
        .with_token(USDT, "Tether USD", "USDT", 6, 1_000_000_000)
        .with_token(DAI, "Dai Stablecoin", "DAI", 18, 5_000_000);
    let b = MockRpc::new();
    let c = MockRpc::new().with_token(USDT_C, "(PoS) Tether USD", "USDT", 6, 2_000_000);
    (Arc::new(a), Arc::new(b), Arc::new(c))
}

/// Explorer in the given mode over [`token_chains`] and [`test_curated`].
pub fn token_explorer(mode: SearchMode, index: Arc<MockIndex>) -> Explorer {
    let (a, b, c) = token_chains();
    explorer_builder(clients(&[(CHAIN_A, a), (CHAIN_B, b), (CHAIN_C, c)]))
        .curated_tokens(test_curated())
        .search_mode(mode)
        .token_index(index)
        .build()
}

// ============================================================================
// Live network
// ============================================================================

/// Helper to create a live explorer when network tests are enabled.
pub fn create_live_explorer() -> Option<Explorer> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    if std::env::var("LOOKUP_LIVE_TESTS").ok()?.is_empty() {
        return None;
    }

    let config = Config::from_env().ok()?;
    Explorer::new(&config).ok()
}

/// Helper to create an MCP server over mock chains.
pub fn create_test_server() -> LookupServer {
    let (a, b, c) = token_chains();
    let explorer = explorer_builder(clients(&[(CHAIN_A, a), (CHAIN_B, b), (CHAIN_C, c)]))
        .curated_tokens(test_curated())
        .build();
    LookupServer::from_explorer(explorer)
}

/// Skip test if live network tests are not enabled.
#[macro_export]
macro_rules! skip_if_no_network {
    () => {
        match common::create_live_explorer() {
            Some(explorer) => explorer,
            None => {
                eprintln!("Skipping test: LOOKUP_LIVE_TESTS not set");
                return;
            }
        }
    };
}
