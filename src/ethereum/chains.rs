//! Chain registry.
//!
//! An ordered, immutable list of the EVM networks every search fans out to.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Native currency of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    /// Currency name (e.g., "Ether").
    pub name: String,
    /// Currency symbol (e.g., "ETH").
    pub symbol: String,
    /// Number of decimals of the base unit.
    pub decimals: u8,
}

/// A supported EVM network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainDescriptor {
    /// EIP-155 chain id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// JSON-RPC endpoint.
    pub rpc_url: String,
    /// Block explorer base URL.
    pub explorer_url: String,
    /// Native currency.
    pub native_currency: NativeCurrency,
}

impl ChainDescriptor {
    /// Block explorer link for an address on this chain.
    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer_url, address)
    }
}

struct BuiltinChain {
    id: u64,
    name: &'static str,
    rpc_url: &'static str,
    explorer_url: &'static str,
    currency: (&'static str, &'static str),
}

const BUILTIN_CHAINS: &[BuiltinChain] = &[
    BuiltinChain {
        id: 1,
        name: "Ethereum",
        rpc_url: "https://eth.llamarpc.com",
        explorer_url: "https://etherscan.io",
        currency: ("Ether", "ETH"),
    },
    BuiltinChain {
        id: 56,
        name: "BNB Smart Chain",
        rpc_url: "https://bsc-dataseed.binance.org",
        explorer_url: "https://bscscan.com",
        currency: ("BNB", "BNB"),
    },
    BuiltinChain {
        id: 137,
        name: "Polygon",
        rpc_url: "https://polygon-rpc.com",
        explorer_url: "https://polygonscan.com",
        currency: ("MATIC", "MATIC"),
    },
    BuiltinChain {
        id: 42161,
        name: "Arbitrum One",
        rpc_url: "https://arb1.arbitrum.io/rpc",
        explorer_url: "https://arbiscan.io",
        currency: ("Ether", "ETH"),
    },
    BuiltinChain {
        id: 10,
        name: "Optimism",
        rpc_url: "https://mainnet.optimism.io",
        explorer_url: "https://optimistic.etherscan.io",
        currency: ("Ether", "ETH"),
    },
    BuiltinChain {
        id: 43114,
        name: "Avalanche C-Chain",
        rpc_url: "https://api.avax.network/ext/bc/C/rpc",
        explorer_url: "https://snowtrace.io",
        currency: ("Avalanche", "AVAX"),
    },
    BuiltinChain {
        id: 250,
        name: "Fantom",
        rpc_url: "https://rpc.ftm.tools",
        explorer_url: "https://ftmscan.com",
        currency: ("Fantom", "FTM"),
    },
    BuiltinChain {
        id: 8453,
        name: "Base",
        rpc_url: "https://mainnet.base.org",
        explorer_url: "https://basescan.org",
        currency: ("Ether", "ETH"),
    },
    BuiltinChain {
        id: 159,
        name: "Roburna Testnet",
        rpc_url: "https://preseed-testnet-1.roburna.com/",
        explorer_url: "https://testnet.rbascan.com",
        currency: ("Roburna", "RBA"),
    },
];

/// Ordered registry of supported chains.
///
/// Order matters: search results are reported in registry order.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    chains: Vec<ChainDescriptor>,
}

impl ChainRegistry {
    /// Create a registry from a list of chains.
    ///
    /// # Errors
    /// Returns `AppError::Config` if two chains share an id.
    pub fn new(chains: Vec<ChainDescriptor>) -> Result<Self> {
        let mut seen = HashSet::new();
        for chain in &chains {
            if !seen.insert(chain.id) {
                return Err(AppError::Config(format!("Duplicate chain id {}", chain.id)));
            }
        }
        Ok(Self { chains })
    }

    /// The built-in chain table.
    pub fn builtin() -> Self {
        let chains = BUILTIN_CHAINS
            .iter()
            .map(|c| ChainDescriptor {
                id: c.id,
                name: c.name.to_string(),
                rpc_url: c.rpc_url.to_string(),
                explorer_url: c.explorer_url.to_string(),
                native_currency: NativeCurrency {
                    name: c.currency.0.to_string(),
                    symbol: c.currency.1.to_string(),
                    decimals: 18,
                },
            })
            .collect();
        Self { chains }
    }

    /// Replace RPC endpoints for the chains listed in `overrides`.
    ///
    /// Overrides for chains that are not registered are ignored.
    pub fn with_rpc_overrides(mut self, overrides: &HashMap<u64, String>) -> Self {
        for chain in &mut self.chains {
            if let Some(url) = overrides.get(&chain.id) {
                tracing::info!(chain_id = chain.id, rpc_url = %url, "Using RPC override");
                chain.rpc_url = url.clone();
            }
        }
        self
    }

    /// All chains, in registry order.
    pub fn chains(&self) -> &[ChainDescriptor] {
        &self.chains
    }

    /// Look up a chain by id.
    pub fn by_id(&self, chain_id: u64) -> Option<&ChainDescriptor> {
        self.chains.iter().find(|c| c.id == chain_id)
    }

    /// Look up a chain by display name (case-insensitive).
    pub fn by_name(&self, name: &str) -> Option<&ChainDescriptor> {
        self.chains.iter().find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Position of a chain in registry order.
    pub fn position(&self, chain_id: u64) -> Option<usize> {
        self.chains.iter().position(|c| c.id == chain_id)
    }

    /// Number of registered chains.
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(id: u64, name: &str) -> ChainDescriptor {
        ChainDescriptor {
            id,
            name: name.to_string(),
            rpc_url: format!("http://localhost:{}", 8500 + id),
            explorer_url: "https://explorer.test".to_string(),
            native_currency: NativeCurrency {
                name: "Ether".to_string(),
                symbol: "ETH".to_string(),
                decimals: 18,
            },
        }
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let registry = ChainRegistry::builtin();
        assert!(ChainRegistry::new(registry.chains().to_vec()).is_ok());
        assert_eq!(registry.len(), 9);
    }

    #[test]
    fn test_builtin_order_starts_with_ethereum() {
        let registry = ChainRegistry::builtin();
        let ids: Vec<u64> = registry.chains().iter().map(|c| c.id).collect();
        assert_eq!(ids[..3], [1, 56, 137]);
        assert_eq!(registry.position(8453), Some(7));
    }

    #[test]
    fn test_lookup_by_id() {
        let registry = ChainRegistry::builtin();
        let polygon = registry.by_id(137).unwrap();
        assert_eq!(polygon.name, "Polygon");
        assert_eq!(polygon.native_currency.symbol, "MATIC");
        assert!(registry.by_id(999_999).is_none());
    }

    #[test]
    fn test_lookup_by_name_is_case_insensitive() {
        let registry = ChainRegistry::builtin();
        assert_eq!(registry.by_name("arbitrum one").map(|c| c.id), Some(42161));
        assert_eq!(registry.by_name("BASE").map(|c| c.id), Some(8453));
        assert!(registry.by_name("Solana").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = ChainRegistry::new(vec![chain(1, "A"), chain(1, "B")]);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_rpc_overrides() {
        let overrides = HashMap::from([(1, "http://node.local:8545".to_string()), (7, "x".into())]);
        let registry = ChainRegistry::builtin().with_rpc_overrides(&overrides);
        assert_eq!(registry.by_id(1).unwrap().rpc_url, "http://node.local:8545");
        assert_eq!(registry.by_id(56).unwrap().rpc_url, "https://bsc-dataseed.binance.org");
    }

    #[test]
    fn test_address_url() {
        let registry = ChainRegistry::builtin();
        let eth = registry.by_id(1).unwrap();
        assert_eq!(
            eth.address_url("0xdAC17F958D2ee523a2206206994597C13D831ec7"),
            "https://etherscan.io/address/0xdAC17F958D2ee523a2206206994597C13D831ec7"
        );
    }
}
