//! Plain-text rendering of search results for the command line.

use std::fmt;

use alloy::primitives::U256;

use crate::{
    ethereum::ChainRegistry,
    types::{format_units, AccountRecord, SearchOutcome, TokenDescriptor},
};

const RULE_WIDTH: usize = 80;

/// Render a search outcome as a human-readable report.
pub fn render_outcome(outcome: &SearchOutcome, registry: &ChainRegistry) -> String {
    OutcomeReport { outcome, registry }.to_string()
}

/// Usage text listing the supported chains.
pub fn render_usage(registry: &ChainRegistry) -> String {
    Usage { registry }.to_string()
}

/// A search outcome with the registry needed to resolve native symbols and
/// explorer links.
pub struct OutcomeReport<'a> {
    pub outcome: &'a SearchOutcome,
    pub registry: &'a ChainRegistry,
}

impl fmt::Display for OutcomeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{}", rule)?;

        if !self.outcome.matched {
            writeln!(f, "No results found")?;
            return writeln!(f, "{}", rule);
        }

        writeln!(
            f,
            "Found {} result(s) for \"{}\"",
            self.outcome.records.len(),
            self.outcome.query
        )?;
        writeln!(f, "Search type: {}", self.outcome.strategy)?;

        for (index, record) in self.outcome.records.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "Result #{}", index + 1)?;
            write_record(f, record, self.registry)?;
            writeln!(f, "   {}", "-".repeat(RULE_WIDTH - 4))?;
        }

        writeln!(f, "{}", rule)
    }
}

fn write_record(
    f: &mut fmt::Formatter<'_>,
    record: &AccountRecord,
    registry: &ChainRegistry,
) -> fmt::Result {
    let chain = registry.by_id(record.chain_id);
    let native_symbol = chain.map(|c| c.native_currency.symbol.as_str()).unwrap_or("native");

    writeln!(f, "   Chain: {} (Chain ID: {})", record.chain_name, record.chain_id)?;
    writeln!(f, "   Address: {}", record.address)?;
    writeln!(f, "   Is Contract: {}", if record.is_contract { "Yes" } else { "No" })?;
    writeln!(f, "   Balance: {} {}", record.native_balance, native_symbol)?;

    if let Some(preview) = &record.code_preview {
        writeln!(f, "   Code: {}", preview)?;
    }

    if let Some(chain) = chain {
        writeln!(f, "   Explorer: {}", chain.address_url(&record.address))?;
    }

    match &record.token {
        Some(token) => write_token(f, token),
        None => Ok(()),
    }
}

fn write_token(f: &mut fmt::Formatter<'_>, token: &TokenDescriptor) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "   Token Information:")?;
    writeln!(f, "      Name: {}", token.name)?;
    writeln!(f, "      Symbol: {}", token.symbol)?;
    writeln!(f, "      Decimals: {}", token.decimals)?;

    match token.total_supply.parse::<U256>() {
        Ok(raw) => writeln!(
            f,
            "      Total Supply: {} ({} raw)",
            format_units(raw, token.decimals),
            token.total_supply
        ),
        Err(_) => writeln!(f, "      Total Supply: {}", token.total_supply),
    }
}

/// CLI usage with the supported chains.
pub struct Usage<'a> {
    pub registry: &'a ChainRegistry,
}

impl fmt::Display for Usage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Multi-chain Lookup")?;
        writeln!(f)?;
        writeln!(f, "Usage: multichain-lookup <address | token symbol | token name>")?;
        writeln!(f)?;
        writeln!(f, "Examples:")?;
        writeln!(f, "  multichain-lookup 0xdAC17F958D2ee523a2206206994597C13D831ec7")?;
        writeln!(f, "  multichain-lookup USDT")?;
        writeln!(f, "  multichain-lookup Tether")?;
        writeln!(f)?;
        writeln!(f, "Supported chains:")?;

        for chain in self.registry.chains() {
            writeln!(
                f,
                "  - {} (Chain ID: {}, native: {})",
                chain.name, chain.id, chain.native_currency.symbol
            )?;
        }

        Ok(())
    }
}
