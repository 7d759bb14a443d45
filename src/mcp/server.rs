//! MCP server implementation.

use rmcp::{
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{Implementation, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use serde::Serialize;

use crate::{
    config::Config,
    error::AppError,
    services::{parse_address, Explorer},
};

/// Multi-chain lookup MCP server.
///
/// Exposes address and token search across every supported chain.
#[derive(Clone)]
pub struct LookupServer {
    explorer: Explorer,
    tool_router: ToolRouter<Self>,
}

impl LookupServer {
    /// Create a new lookup server.
    ///
    /// Note: This uses lazy initialization - no network calls are made during
    /// server startup. Chain endpoints are contacted when a tool is invoked.
    pub fn new(config: Config) -> Result<Self, AppError> {
        tracing::info!("Initializing Multi-chain Lookup MCP Server");

        let explorer = Explorer::new(&config)?;

        tracing::info!("Multi-chain Lookup MCP Server initialized successfully");

        Ok(Self::from_explorer(explorer))
    }

    /// Serve an existing explorer.
    pub fn from_explorer(explorer: Explorer) -> Self {
        Self { explorer, tool_router: Self::tool_router() }
    }

    /// The explorer behind the tools.
    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }
}

/// Input parameters for the smart_search tool.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct SmartSearchInput {
    /// Address (0x...), token symbol (e.g., "USDT") or token name (e.g., "Tether").
    pub query: String,
}

/// Input parameters for the search_by_address tool.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchByAddressInput {
    /// Account or contract address to look up (0x + 40 hex characters).
    pub address: String,
}

/// Input parameters for the search_by_token_name tool.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchByTokenNameInput {
    /// Name fragment, matched case-insensitively (e.g., "tether").
    pub name: String,
}

/// Input parameters for the search_by_token_symbol tool.
#[derive(Debug, Clone, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchByTokenSymbolInput {
    /// Exact ticker symbol, matched case-insensitively (e.g., "USDC").
    pub symbol: String,
}

/// Input parameters for the get_supported_chains tool.
#[derive(Debug, Clone, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct GetSupportedChainsInput {}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))
}

#[tool_router]
impl LookupServer {
    /// Search an address, token symbol or token name across all chains.
    ///
    /// Addresses are always searched as addresses. Other text goes to token
    /// search. Never fails; an empty result is reported as unmatched.
    #[tool(
        description = "Search an address, token symbol or token name across all supported EVM chains"
    )]
    pub async fn smart_search(
        &self,
        Parameters(input): Parameters<SmartSearchInput>,
    ) -> Result<String, McpError> {
        tracing::info!(query = %input.query, "smart_search called");

        let outcome = self.explorer.smart_search(&input.query).await;
        to_json(&outcome)
    }

    /// Look up an address on every supported chain.
    ///
    /// Returns the native balance per chain, and token metadata when the
    /// address is an ERC20 contract.
    #[tool(
        description = "Look up an address on every supported EVM chain: native balance, contract detection and ERC20 metadata"
    )]
    pub async fn search_by_address(
        &self,
        Parameters(input): Parameters<SearchByAddressInput>,
    ) -> Result<String, McpError> {
        tracing::info!(address = %input.address, "search_by_address called");

        parse_address(&input.address)?;

        let outcome = self.explorer.search_by_address(input.address.trim()).await;
        to_json(&outcome)
    }

    /// Find curated tokens whose name contains the given fragment.
    #[tool(description = "Find well-known tokens whose name contains the given text on every supported chain")]
    pub async fn search_by_token_name(
        &self,
        Parameters(input): Parameters<SearchByTokenNameInput>,
    ) -> Result<String, McpError> {
        tracing::info!(name = %input.name, "search_by_token_name called");

        let outcome = self.explorer.search_by_token_name(&input.name).await;
        to_json(&outcome)
    }

    /// Find curated tokens with the given symbol.
    #[tool(description = "Find well-known tokens with the given symbol on every supported chain")]
    pub async fn search_by_token_symbol(
        &self,
        Parameters(input): Parameters<SearchByTokenSymbolInput>,
    ) -> Result<String, McpError> {
        tracing::info!(symbol = %input.symbol, "search_by_token_symbol called");

        let outcome = self.explorer.search_by_token_symbol(&input.symbol).await;
        to_json(&outcome)
    }

    /// List the supported chains in search order.
    #[tool(description = "List the supported EVM chains with their RPC endpoint, explorer and native currency")]
    pub async fn get_supported_chains(
        &self,
        Parameters(_input): Parameters<GetSupportedChainsInput>,
    ) -> Result<String, McpError> {
        tracing::info!("get_supported_chains called");

        to_json(&self.explorer.supported_chains())
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for LookupServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "multichain-lookup".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Multi-chain Lookup MCP Server. Searches addresses, token symbols and \
                 token names across Ethereum, BNB Smart Chain, Polygon, Arbitrum, Optimism, \
                 Avalanche, Fantom, Base and Roburna Testnet."
                    .to_string(),
            ),
        }
    }
}
