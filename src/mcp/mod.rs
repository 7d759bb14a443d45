//! MCP server module.
//!
//! Contains the MCP server implementation with tool handlers.

pub mod server;

pub use server::LookupServer;
pub use server::{
    GetSupportedChainsInput, SearchByAddressInput, SearchByTokenNameInput,
    SearchByTokenSymbolInput, SmartSearchInput,
};
