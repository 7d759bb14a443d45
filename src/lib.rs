//! Multi-chain Lookup Library
//!
//! Searches addresses, token symbols and token names across several EVM
//! networks at once and merges the per-chain answers into one result.
//!
//! # Features
//!
//! - **Address Search**: Native balance, contract detection and ERC20 metadata on every chain
//! - **Token Search**: Symbol and name matching over curated per-chain token lists
//! - **Token Discovery**: Free-text resolution through the CoinGecko coin index
//! - **Smart Search**: One entry point that routes addresses and text to the right search
//!
//! # Example
//!
//! ```rust,ignore
//! use multichain_lookup::{Config, Explorer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let explorer = Explorer::new(&config)?;
//!     let outcome = explorer.smart_search("USDT").await;
//!     println!("{} record(s)", outcome.records.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod ethereum;
pub mod logging;
pub mod mcp;
pub mod report;
pub mod services;
pub mod types;

pub use config::{Config, SearchMode};
pub use error::{AppError, Result};
pub use ethereum::{ChainDescriptor, ChainRegistry, NativeCurrency};
pub use mcp::LookupServer;
pub use services::{Explorer, ExplorerBuilder};
pub use types::{AccountRecord, SearchOutcome, SearchStrategy, TokenDescriptor};
