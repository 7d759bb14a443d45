//! Multi-chain Lookup MCP Server
//!
//! Exposes the multi-chain search tools to MCP clients over stdio.

use rmcp::ServiceExt;

use multichain_lookup::{logging, Config, LookupServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    logging::init(&config.log_level);

    let mode = config.search_mode;
    let overrides = config.rpc_overrides.len();
    let server = LookupServer::new(config)?;

    tracing::info!(
        chains = server.explorer().supported_chains().len(),
        mode = ?mode,
        rpc_overrides = overrides,
        "Serving multi-chain lookup over stdio"
    );

    let running = server.serve(rmcp::transport::stdio()).await?;

    tokio::select! {
        quit = running.waiting() => {
            quit?;
            tracing::info!("MCP client disconnected");
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("Interrupted, shutting down");
        }
    }

    Ok(())
}
