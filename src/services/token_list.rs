//! Curated per-chain token lists.
//!
//! A small allow-list of well-known token contracts per chain. Symbol and
//! name search only ever consider these tokens.

use std::collections::HashMap;

use alloy::primitives::Address;

use crate::ethereum::constants::CURATED_TOKENS;

/// Token addresses keyed by chain id.
#[derive(Debug, Clone, Default)]
pub struct CuratedTokens {
    by_chain: HashMap<u64, Vec<Address>>,
}

impl CuratedTokens {
    /// An empty list for every chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in lists.
    pub fn builtin() -> Self {
        let by_chain =
            CURATED_TOKENS.iter().map(|(chain_id, tokens)| (*chain_id, tokens.to_vec())).collect();
        Self { by_chain }
    }

    /// Replace the list for one chain.
    pub fn with_tokens(mut self, chain_id: u64, tokens: impl IntoIterator<Item = Address>) -> Self {
        self.by_chain.insert(chain_id, tokens.into_iter().collect());
        self
    }

    /// Curated tokens of a chain, in list order (empty if none).
    pub fn tokens(&self, chain_id: u64) -> &[Address] {
        self.by_chain.get(&chain_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of curated tokens across chains.
    pub fn len(&self) -> usize {
        self.by_chain.values().map(Vec::len).sum()
    }

    /// Whether no chain has a curated token.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
