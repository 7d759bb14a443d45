//! Search result types.

use std::collections::HashSet;

use alloy::primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};

use crate::{ethereum::ChainDescriptor, types::TokenDescriptor};

/// Hex characters of bytecode kept in a record's code preview.
pub const CODE_PREVIEW_LEN: usize = 100;

/// Strategy that produced a search outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    /// Lookup of one address on every chain.
    Address,
    /// Substring match on token names.
    Name,
    /// Exact match on token symbols.
    Symbol,
    /// Free-text token search (symbol and name, or the external index).
    NameOrSymbol,
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SearchStrategy::Address => "address",
            SearchStrategy::Name => "name",
            SearchStrategy::Symbol => "symbol",
            SearchStrategy::NameOrSymbol => "name-or-symbol",
        };
        f.write_str(label)
    }
}

/// One chain's answer for one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Account or contract address (EIP-55 checksummed).
    pub address: String,
    /// Chain ID.
    pub chain_id: u64,
    /// Chain display name.
    pub chain_name: String,
    /// Whether bytecode is deployed at the address.
    pub is_contract: bool,
    /// Human-readable native balance ("0" for token identity records).
    pub native_balance: String,
    /// Leading bytecode, for contracts found by address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_preview: Option<String>,
    /// ERC20 metadata, when the contract is a token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<TokenDescriptor>,
}

impl AccountRecord {
    /// A plain account (no bytecode). Never carries token metadata.
    pub fn account(chain: &ChainDescriptor, address: Address, native_balance: String) -> Self {
        Self {
            address: address.to_checksum(None),
            chain_id: chain.id,
            chain_name: chain.name.clone(),
            is_contract: false,
            native_balance,
            code_preview: None,
            token: None,
        }
    }

    /// A contract found by address lookup.
    pub fn contract(
        chain: &ChainDescriptor,
        address: Address,
        native_balance: String,
        code: &Bytes,
        token: Option<TokenDescriptor>,
    ) -> Self {
        Self {
            address: address.to_checksum(None),
            chain_id: chain.id,
            chain_name: chain.name.clone(),
            is_contract: true,
            native_balance,
            code_preview: Some(code_preview(code)),
            token,
        }
    }

    /// A token found by symbol, name or index search.
    ///
    /// Balance is not fetched on this path; it is reported as `"0"`.
    pub fn token_identity(token: TokenDescriptor) -> Self {
        Self {
            address: token.contract_address.clone(),
            chain_id: token.chain_id,
            chain_name: token.chain_name.clone(),
            is_contract: true,
            native_balance: "0".to_string(),
            code_preview: None,
            token: Some(token),
        }
    }

    /// Merge key: chain id and lower-cased address.
    pub fn dedup_key(&self) -> (u64, String) {
        (self.chain_id, self.address.to_lowercase())
    }
}

/// Terminal value of every search operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Whether any record was found.
    pub matched: bool,
    /// Records in registry order.
    pub records: Vec<AccountRecord>,
    /// Query text as given by the caller.
    pub query: String,
    /// Strategy that produced the records.
    pub strategy: SearchStrategy,
}

impl SearchOutcome {
    /// Build an outcome; `matched` follows from `records`.
    pub fn new(query: impl Into<String>, strategy: SearchStrategy, records: Vec<AccountRecord>) -> Self {
        Self { matched: !records.is_empty(), records, query: query.into(), strategy }
    }

    /// An outcome with no records.
    pub fn unmatched(query: impl Into<String>, strategy: SearchStrategy) -> Self {
        Self::new(query, strategy, Vec::new())
    }
}

/// Drop records whose `(chain_id, lower-cased address)` was already seen.
///
/// The first occurrence wins and relative order is kept.
pub fn dedup_records(records: Vec<AccountRecord>) -> Vec<AccountRecord> {
    let mut seen = HashSet::new();
    records.into_iter().filter(|record| seen.insert(record.dedup_key())).collect()
}

/// `0x`-prefixed bytecode cut to [`CODE_PREVIEW_LEN`] characters, plus `...`.
fn code_preview(code: &Bytes) -> String {
    let hex = code.to_string();
    let cut: String = hex.chars().take(CODE_PREVIEW_LEN).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ethereum::ChainRegistry;
    use alloy::primitives::address;

    const USDT: Address = address!("dAC17F958D2ee523a2206206994597C13D831ec7");

    fn token(chain_id: u64, address: &str) -> TokenDescriptor {
        TokenDescriptor {
            contract_address: address.to_string(),
            name: "Tether USD".to_string(),
            symbol: "USDT".to_string(),
            decimals: 6,
            total_supply: "1".to_string(),
            chain_id,
            chain_name: format!("chain-{}", chain_id),
        }
    }

    #[test]
    fn test_account_record_never_carries_token() {
        let registry = ChainRegistry::builtin();
        let record = AccountRecord::account(registry.by_id(1).unwrap(), USDT, "0.0".into());
        assert!(!record.is_contract);
        assert!(record.token.is_none());
        assert!(record.code_preview.is_none());
        assert_eq!(record.address, "0xdAC17F958D2ee523a2206206994597C13D831ec7");
    }

    #[test]
    fn test_contract_record_code_preview() {
        let registry = ChainRegistry::builtin();
        let code = Bytes::from(vec![0x60u8; 80]);
        let record =
            AccountRecord::contract(registry.by_id(1).unwrap(), USDT, "0.0".into(), &code, None);

        let preview = record.code_preview.unwrap();
        assert!(preview.starts_with("0x6060"));
        assert!(preview.ends_with("..."));
        assert_eq!(preview.len(), CODE_PREVIEW_LEN + 3);
    }

    #[test]
    fn test_token_identity_record() {
        let record = AccountRecord::token_identity(token(137, "0xc2132D05D31c914a87C6611C10748AEb04B58e8F"));
        assert!(record.is_contract);
        assert_eq!(record.native_balance, "0");
        assert_eq!(record.chain_id, 137);
        assert_eq!(record.token.as_ref().unwrap().symbol, "USDT");
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let records = vec![
            AccountRecord::token_identity(token(1, "0xAAAAaaaaAAAAaaaaAAAAaaaaAAAAaaaaAAAAaaaa")),
            AccountRecord::token_identity(token(56, "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa")),
            AccountRecord::token_identity(token(1, "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa")),
        ];

        let deduped = dedup_records(records);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].chain_id, 1);
        assert_eq!(deduped[0].address, "0xAAAAaaaaAAAAaaaaAAAAaaaaAAAAaaaaAAAAaaaa");
        assert_eq!(deduped[1].chain_id, 56);
    }

    #[test]
    fn test_outcome_matched_follows_records() {
        let empty = SearchOutcome::unmatched("nothing", SearchStrategy::Name);
        assert!(!empty.matched);

        let found = SearchOutcome::new(
            "usdt",
            SearchStrategy::Symbol,
            vec![AccountRecord::token_identity(token(1, "0x01"))],
        );
        assert!(found.matched);
        assert_eq!(found.records.len(), 1);
    }

    #[test]
    fn test_strategy_serialization() {
        assert_eq!(serde_json::to_string(&SearchStrategy::NameOrSymbol).unwrap(), "\"name-or-symbol\"");
        assert_eq!(serde_json::to_string(&SearchStrategy::Address).unwrap(), "\"address\"");
        assert_eq!(SearchStrategy::NameOrSymbol.to_string(), "name-or-symbol");
    }

    #[test]
    fn test_record_serialization_skips_absent_fields() {
        let registry = ChainRegistry::builtin();
        let record = AccountRecord::account(registry.by_id(10).unwrap(), USDT, "2.5".into());
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("token"));
        assert!(!json.contains("code_preview"));
        assert!(json.contains("\"native_balance\":\"2.5\""));
    }
}
