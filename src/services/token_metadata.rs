//! ERC20 metadata fetching.

use std::{sync::Arc, time::Duration};

use alloy::{
    primitives::{Address, Bytes},
    sol_types::SolCall,
};

use crate::{
    error::{AppError, Result},
    ethereum::{contracts::IERC20, with_deadline, ChainClients, ChainRegistry, ChainRpc},
    types::TokenDescriptor,
};

/// Fetches name, symbol, decimals and total supply of a token contract.
///
/// All four reads must succeed; otherwise the token is reported absent.
#[derive(Clone)]
pub struct TokenMetadataFetcher {
    registry: Arc<ChainRegistry>,
    clients: Arc<ChainClients>,
    rpc_timeout: Duration,
}

impl TokenMetadataFetcher {
    /// Create a new fetcher.
    pub fn new(
        registry: Arc<ChainRegistry>,
        clients: Arc<ChainClients>,
        rpc_timeout: Duration,
    ) -> Self {
        Self { registry, clients, rpc_timeout }
    }

    /// Token metadata of `address` on `chain_id`, or `None` if the chain is
    /// unknown or the contract does not answer as an ERC20 token.
    pub async fn fetch(&self, address: Address, chain_id: u64) -> Option<TokenDescriptor> {
        match self.try_fetch(address, chain_id).await {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::debug!(
                    chain_id = chain_id,
                    address = %address,
                    error = %e,
                    "Not a readable ERC20 token"
                );
                None
            }
        }
    }

    async fn try_fetch(&self, address: Address, chain_id: u64) -> Result<TokenDescriptor> {
        let chain = self.registry.by_id(chain_id).ok_or(AppError::UnknownChain(chain_id))?;
        let client = self.clients.get(chain_id).ok_or(AppError::UnknownChain(chain_id))?;
        let client = client.as_ref();

        let (name, symbol, decimals, total_supply) = tokio::try_join!(
            self.read(client, address, IERC20::nameCall {}),
            self.read(client, address, IERC20::symbolCall {}),
            self.read(client, address, IERC20::decimalsCall {}),
            self.read(client, address, IERC20::totalSupplyCall {}),
        )?;

        Ok(TokenDescriptor {
            contract_address: address.to_checksum(None),
            name,
            symbol,
            decimals,
            total_supply: total_supply.to_string(),
            chain_id,
            chain_name: chain.name.clone(),
        })
    }

    /// One read-only contract call, decoded with the call's ABI.
    async fn read<C: SolCall>(
        &self,
        client: &dyn ChainRpc,
        to: Address,
        call: C,
    ) -> Result<C::Return> {
        let data = Bytes::from(call.abi_encode());
        let raw = with_deadline(self.rpc_timeout, client.call(to, data)).await?;
        Ok(C::abi_decode_returns(&raw)?)
    }
}
