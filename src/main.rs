//! Multi-chain Lookup CLI
//!
//! Searches an address, token symbol or token name across all supported
//! EVM chains and prints a text report.

use multichain_lookup::{
    logging,
    report::{render_outcome, render_usage},
    ChainRegistry, Config, Explorer,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    if query.trim().is_empty() {
        println!("{}", render_usage(&ChainRegistry::builtin()));
        return Ok(());
    }

    let config = Config::from_env()?;
    logging::init(&config.log_level);

    let explorer = Explorer::new(&config)?;

    println!("Searching for \"{}\" across {} chains...", query, explorer.supported_chains().len());

    // Run the search on its own task so a panic surfaces as an error
    let task = tokio::spawn(async move {
        let outcome = explorer.smart_search(&query).await;
        render_outcome(&outcome, explorer.registry())
    });

    let report = task.await?;
    println!("{}", report);

    Ok(())
}
