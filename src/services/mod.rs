//! Business logic services module.

pub mod classifier;
pub mod discovery;
pub mod explorer;
pub mod search;
pub mod token_list;
pub mod token_metadata;

pub use classifier::{classify_query, looks_like_symbol, parse_address, QueryKind};
pub use discovery::{CoinGeckoClient, IndexCoin, TokenDiscovery, TokenIndex};
pub use explorer::{Explorer, ExplorerBuilder};
pub use search::SearchService;
pub use token_list::CuratedTokens;
pub use token_metadata::TokenMetadataFetcher;
