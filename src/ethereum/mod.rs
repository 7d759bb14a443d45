//! Ethereum interaction module.
//!
//! Contains the chain registry, RPC clients, contract bindings and the
//! curated token lists.

pub mod chains;
pub mod client;
pub mod constants;
pub mod contracts;

pub use chains::{ChainDescriptor, ChainRegistry, NativeCurrency};
pub use client::{with_deadline, ChainClients, ChainRpc, EthereumClient, HttpProvider};
