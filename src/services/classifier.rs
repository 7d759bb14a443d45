//! Query classification.
//!
//! Decides whether a free-text query is an address, empty, or token text.

use alloy::primitives::Address;

use crate::error::{AppError, Result};

/// Longest query still hinted as a ticker symbol.
pub const MAX_SYMBOL_HINT_LEN: usize = 6;

/// Kind of a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind<'a> {
    /// Blank after trimming.
    Empty,
    /// A well-formed address.
    Address(Address),
    /// Anything else: a token name or symbol.
    Text {
        /// Trimmed query.
        text: &'a str,
        /// Whether the text reads like a ticker (e.g., "USDT").
        symbol_like: bool,
    },
}

/// Classify a raw query. Address interpretation always wins.
pub fn classify_query(query: &str) -> QueryKind<'_> {
    let text = query.trim();

    if text.is_empty() {
        return QueryKind::Empty;
    }

    if let Ok(address) = parse_address(text) {
        return QueryKind::Address(address);
    }

    QueryKind::Text { text, symbol_like: looks_like_symbol(text) }
}

/// Parse and validate an Ethereum address from a string.
///
/// Validates:
/// - 40 hex characters, with or without a `0x` prefix
/// - EIP-55 checksum when the hex digits are mixed-case
///
/// All-lowercase and all-uppercase addresses carry no checksum and are
/// accepted as-is.
pub fn parse_address(s: &str) -> Result<Address> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(AppError::InvalidAddress("address cannot be empty".into()));
    }

    let hex = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")).unwrap_or(trimmed);

    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AppError::InvalidAddress(format!("expected 40 hex characters: {}", s)));
    }

    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());

    if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{}", hex), None)
            .map_err(|e| AppError::InvalidAddress(format!("bad checksum '{}': {}", s, e)))
    } else {
        hex.parse::<Address>().map_err(|e| AppError::InvalidAddress(format!("{}: {}", s, e)))
    }
}

/// Short, upper-case, single-word text containing a letter.
///
/// A display hint only; it never changes which records a search returns.
pub fn looks_like_symbol(text: &str) -> bool {
    let text = text.trim();
    text.chars().count() <= MAX_SYMBOL_HINT_LEN
        && !text.chars().any(char::is_whitespace)
        && text.chars().any(char::is_alphabetic)
        && text == text.to_uppercase()
}
