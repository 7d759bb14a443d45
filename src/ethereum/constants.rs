//! Ethereum network constants.
//!
//! Contains chain IDs and the curated token allow-lists used by symbol and
//! name search.

use alloy::primitives::{address, Address};

// ============================================================================
// Chain IDs
// ============================================================================

/// Ethereum Mainnet chain ID.
pub const ETHEREUM_MAINNET_CHAIN_ID: u64 = 1;

/// BNB Smart Chain chain ID.
pub const BSC_CHAIN_ID: u64 = 56;

/// Polygon PoS chain ID.
pub const POLYGON_CHAIN_ID: u64 = 137;

/// Arbitrum One chain ID.
pub const ARBITRUM_ONE_CHAIN_ID: u64 = 42161;

/// Optimism chain ID.
pub const OPTIMISM_CHAIN_ID: u64 = 10;

/// Avalanche C-Chain chain ID.
pub const AVALANCHE_CHAIN_ID: u64 = 43114;

/// Fantom Opera chain ID.
pub const FANTOM_CHAIN_ID: u64 = 250;

/// Base chain ID.
pub const BASE_CHAIN_ID: u64 = 8453;

/// Roburna testnet chain ID.
pub const ROBURNA_TESTNET_CHAIN_ID: u64 = 159;

// ============================================================================
// Curated Tokens
// ============================================================================

/// Well-known tokens on Ethereum Mainnet.
pub const ETHEREUM_TOKENS: &[Address] = &[
    address!("dAC17F958D2ee523a2206206994597C13D831ec7"), // USDT
    address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"), // USDC
    address!("6B175474E89094C44Da98b954EedeAC495271d0F"), // DAI
    address!("2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"), // WBTC
    address!("514910771AF9Ca656af840dff83E8264EcF986CA"), // LINK
    address!("7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9"), // AAVE
    address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984"), // UNI
];

/// Well-known tokens on BNB Smart Chain.
pub const BSC_TOKENS: &[Address] = &[
    address!("55d398326f99059fF775485246999027B3197955"), // USDT
    address!("8AC76a51cc950d9822D68b83fE1Ad97B32Cd580d"), // USDC
    address!("e9e7CEA3DedcA5984780Bafc599bD69ADd087D56"), // BUSD
    address!("2170Ed0880ac9A755fd29B2688956BD959F933F8"), // ETH
];

/// Well-known tokens on Polygon.
pub const POLYGON_TOKENS: &[Address] = &[
    address!("c2132D05D31c914a87C6611C10748AEb04B58e8F"), // USDT
    address!("2791Bca1f2de4661ED88A30C99A7a9449Aa84174"), // USDC
    address!("8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063"), // DAI
    address!("7ceB23fD6bC0adD59E62ac25578270cFf1b9f619"), // WETH
];

/// Well-known tokens on Arbitrum One.
pub const ARBITRUM_TOKENS: &[Address] = &[
    address!("Fd086bC7CD5C481DCC9C85ebE478A1C0b69FCbb9"), // USDT
    address!("FF970A61A04b1cA14834A43f5dE4533eBDDB5CC8"), // USDC
    address!("DA10009cBd5D07dd0CeCc66161FC93D7c9000da1"), // DAI
];

/// Well-known tokens on Optimism.
pub const OPTIMISM_TOKENS: &[Address] = &[
    address!("94b008aA00579c1307B0EF2c499aD98a8ce58e58"), // USDT
    address!("7F5c764cBc14f9669B88837ca1490cCa17c31607"), // USDC
    address!("DA10009cBd5D07dd0CeCc66161FC93D7c9000da1"), // DAI
];

/// Test tokens on the Roburna testnet.
pub const ROBURNA_TESTNET_TOKENS: &[Address] = &[
    address!("67e67af2c0B5DAccf275F848BaFe509a71e8DAb0"), // ATT
];

/// Built-in curated lists keyed by chain id.
pub const CURATED_TOKENS: &[(u64, &[Address])] = &[
    (ETHEREUM_MAINNET_CHAIN_ID, ETHEREUM_TOKENS),
    (BSC_CHAIN_ID, BSC_TOKENS),
    (POLYGON_CHAIN_ID, POLYGON_TOKENS),
    (ARBITRUM_ONE_CHAIN_ID, ARBITRUM_TOKENS),
    (OPTIMISM_CHAIN_ID, OPTIMISM_TOKENS),
    (ROBURNA_TESTNET_CHAIN_ID, ROBURNA_TESTNET_TOKENS),
];

// ============================================================================
// External Index Platforms
// ============================================================================

/// CoinGecko asset platform ids mapped to chain ids.
pub const PLATFORM_CHAIN_IDS: &[(&str, u64)] = &[
    ("ethereum", ETHEREUM_MAINNET_CHAIN_ID),
    ("binance-smart-chain", BSC_CHAIN_ID),
    ("polygon-pos", POLYGON_CHAIN_ID),
    ("arbitrum-one", ARBITRUM_ONE_CHAIN_ID),
    ("optimism", OPTIMISM_CHAIN_ID),
    ("avalanche", AVALANCHE_CHAIN_ID),
    ("fantom", FANTOM_CHAIN_ID),
    ("base", BASE_CHAIN_ID),
];

/// Chain id for a CoinGecko platform id.
pub fn platform_chain_id(platform: &str) -> Option<u64> {
    PLATFORM_CHAIN_IDS.iter().find(|(name, _)| *name == platform).map(|(_, id)| *id)
}
