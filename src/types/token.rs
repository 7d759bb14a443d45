//! Token-related types.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

/// ERC20 metadata of a token contract on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDescriptor {
    /// Token contract address (EIP-55 checksummed).
    pub contract_address: String,
    /// Token name (e.g., "Tether USD").
    pub name: String,
    /// Token symbol (e.g., "USDT").
    pub symbol: String,
    /// Number of decimals.
    pub decimals: u8,
    /// Total supply in the smallest unit, as decimal text.
    pub total_supply: String,
    /// Chain ID where the contract lives.
    pub chain_id: u64,
    /// Chain display name.
    pub chain_name: String,
}

impl TokenDescriptor {
    /// Case-insensitive exact symbol match.
    pub fn symbol_matches(&self, symbol: &str) -> bool {
        self.symbol.to_lowercase() == symbol.to_lowercase()
    }

    /// Case-insensitive substring match on the name.
    pub fn name_contains(&self, fragment: &str) -> bool {
        self.name.to_lowercase().contains(&fragment.to_lowercase())
    }
}

/// Format a U256 value with decimals to a human-readable string.
///
/// The result always carries a fractional part (`"1.0"`, `"0.0"`,
/// `"0.5"`) and is exact for any 256-bit value.
pub fn format_units(value: U256, decimals: u8) -> String {
    let decimals = decimals as usize;
    let mut digits = value.to_string();

    if decimals == 0 {
        return format!("{}.0", digits);
    }

    // Left-pad so there is at least one integer digit
    if digits.len() <= decimals {
        digits = format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits);
    }

    let (integer, fraction) = digits.split_at(digits.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        format!("{}.0", integer)
    } else {
        format!("{}.{}", integer, fraction)
    }
}
