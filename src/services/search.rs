//! Per-chain search strategies.
//!
//! Every operation fans out to all registered chains at once and waits for
//! all of them. A chain that fails, or is still running when the search
//! deadline passes, contributes nothing; it never fails the operation.

use std::{sync::Arc, time::Duration};

use alloy::primitives::Address;
use futures::future::join_all;
use tokio::time::{timeout_at, Instant};

use crate::{
    error::{AppError, Result},
    ethereum::{with_deadline, ChainClients, ChainDescriptor, ChainRegistry},
    services::{classifier::parse_address, CuratedTokens, TokenMetadataFetcher},
    types::{dedup_records, format_units, AccountRecord, SearchOutcome, SearchStrategy, TokenDescriptor},
};

/// Address, symbol and name search across every registered chain.
#[derive(Clone)]
pub struct SearchService {
    registry: Arc<ChainRegistry>,
    clients: Arc<ChainClients>,
    fetcher: TokenMetadataFetcher,
    curated: Arc<CuratedTokens>,
    rpc_timeout: Duration,
}

impl SearchService {
    /// Create a new search service.
    pub fn new(
        registry: Arc<ChainRegistry>,
        clients: Arc<ChainClients>,
        fetcher: TokenMetadataFetcher,
        curated: Arc<CuratedTokens>,
        rpc_timeout: Duration,
    ) -> Self {
        Self { registry, clients, fetcher, curated, rpc_timeout }
    }

    // ========================================================================
    // Address search
    // ========================================================================

    /// Look up an address on every chain.
    ///
    /// Malformed addresses return an unmatched outcome without any RPC call.
    /// Records follow registry order, at most one per chain. Chains that have
    /// not answered by `deadline` are left out.
    pub async fn search_by_address(&self, query: &str, deadline: Instant) -> SearchOutcome {
        let address = match parse_address(query) {
            Ok(address) => address,
            Err(e) => {
                tracing::debug!(query = %query, error = %e, "Rejected address query");
                return SearchOutcome::unmatched(query, SearchStrategy::Address);
            }
        };

        let lookups =
            self.registry.chains().iter().map(|chain| self.lookup_on_chain(chain, address, deadline));
        let records: Vec<AccountRecord> = join_all(lookups).await.into_iter().flatten().collect();

        tracing::info!(address = %address, records = records.len(), "Address search finished");

        SearchOutcome::new(query, SearchStrategy::Address, records)
    }

    async fn lookup_on_chain(
        &self,
        chain: &ChainDescriptor,
        address: Address,
        deadline: Instant,
    ) -> Option<AccountRecord> {
        match timeout_at(deadline, self.try_lookup_on_chain(chain, address)).await {
            Ok(Ok(record)) => Some(record),
            Ok(Err(e)) => {
                tracing::debug!(chain_id = chain.id, address = %address, error = %e, "Chain lookup failed");
                None
            }
            Err(_) => {
                tracing::warn!(chain_id = chain.id, address = %address, "Chain lookup cut off by search deadline");
                None
            }
        }
    }

    async fn try_lookup_on_chain(
        &self,
        chain: &ChainDescriptor,
        address: Address,
    ) -> Result<AccountRecord> {
        let client = self.clients.get(chain.id).ok_or(AppError::UnknownChain(chain.id))?;

        let (code, balance) = tokio::try_join!(
            with_deadline(self.rpc_timeout, client.get_code(address)),
            with_deadline(self.rpc_timeout, client.get_balance(address)),
        )?;

        let native_balance = format_units(balance, chain.native_currency.decimals);

        if code.is_empty() {
            return Ok(AccountRecord::account(chain, address, native_balance));
        }

        let token = self.fetcher.fetch(address, chain.id).await;
        Ok(AccountRecord::contract(chain, address, native_balance, &code, token))
    }

    // ========================================================================
    // Curated token search
    // ========================================================================

    /// Curated tokens whose symbol equals `symbol` (case-insensitive).
    pub async fn search_by_symbol(&self, symbol: &str, deadline: Instant) -> SearchOutcome {
        let needle = symbol.trim();
        if needle.is_empty() {
            return SearchOutcome::unmatched(symbol, SearchStrategy::Symbol);
        }

        let catalog = self.curated_catalog(deadline).await;
        let records = matching_records(&catalog, |token| token.symbol_matches(needle));

        tracing::info!(symbol = %needle, records = records.len(), "Symbol search finished");

        SearchOutcome::new(symbol, SearchStrategy::Symbol, records)
    }

    /// Curated tokens whose name contains `name` (case-insensitive).
    pub async fn search_by_name(&self, name: &str, deadline: Instant) -> SearchOutcome {
        let needle = name.trim();
        if needle.is_empty() {
            return SearchOutcome::unmatched(name, SearchStrategy::Name);
        }

        let catalog = self.curated_catalog(deadline).await;
        let records = matching_records(&catalog, |token| token.name_contains(needle));

        tracing::info!(name = %needle, records = records.len(), "Name search finished");

        SearchOutcome::new(name, SearchStrategy::Name, records)
    }

    /// Symbol matches followed by name matches, deduplicated.
    ///
    /// Curated metadata is fetched once and both filters run over it.
    pub async fn search_by_name_or_symbol(&self, text: &str, deadline: Instant) -> SearchOutcome {
        let needle = text.trim();
        if needle.is_empty() {
            return SearchOutcome::unmatched(text, SearchStrategy::NameOrSymbol);
        }

        let catalog = self.curated_catalog(deadline).await;
        let mut records = matching_records(&catalog, |token| token.symbol_matches(needle));
        records.extend(matching_records(&catalog, |token| token.name_contains(needle)));
        let records = dedup_records(records);

        tracing::info!(query = %needle, records = records.len(), "Name-or-symbol search finished");

        SearchOutcome::new(text, SearchStrategy::NameOrSymbol, records)
    }

    /// Metadata of every curated token resolved before `deadline`, grouped
    /// by chain in registry order.
    async fn curated_catalog(&self, deadline: Instant) -> Vec<Vec<TokenDescriptor>> {
        let per_chain =
            self.registry.chains().iter().map(|chain| self.curated_on_chain(chain, deadline));
        join_all(per_chain).await
    }

    async fn curated_on_chain(&self, chain: &ChainDescriptor, deadline: Instant) -> Vec<TokenDescriptor> {
        let tokens = self.curated.tokens(chain.id);
        if tokens.is_empty() {
            return Vec::new();
        }

        let fetches =
            tokens.iter().map(|address| timeout_at(deadline, self.fetcher.fetch(*address, chain.id)));
        let results = join_all(fetches).await;
        let cut_off = results.iter().filter(|result| result.is_err()).count();
        let resolved: Vec<TokenDescriptor> =
            results.into_iter().filter_map(|result| result.ok().flatten()).collect();

        if cut_off > 0 {
            tracing::warn!(chain_id = chain.id, cut_off, "Curated token reads cut off by search deadline");
        }

        tracing::debug!(
            chain_id = chain.id,
            curated = tokens.len(),
            resolved = resolved.len(),
            "Curated tokens resolved"
        );

        resolved
    }
}

/// Token identity records for catalog entries accepted by `filter`.
fn matching_records<F>(catalog: &[Vec<TokenDescriptor>], filter: F) -> Vec<AccountRecord>
where
    F: Fn(&TokenDescriptor) -> bool,
{
    catalog
        .iter()
        .flatten()
        .filter(|token| filter(token))
        .cloned()
        .map(AccountRecord::token_identity)
        .collect()
}
