// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! Registry chain configuration and error types.

use std::borrow::Cow;

/// Chain configuration for the certificate registry.
///
/// The RPC URL is a `Cow` so the const presets stay allocation-free while
/// an environment override can carry an owned string.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Chain ID
    pub chain_id: u64,
    /// RPC endpoint URL
    pub rpc_url: Cow<'static, str>,
    /// Block explorer URL
    pub explorer_url: &'static str,
}

/// Ethereum mainnet configuration.
pub const ETH_MAINNET: NetworkConfig = NetworkConfig {
    name: "Ethereum",
    chain_id: 1,
    rpc_url: Cow::Borrowed("https://ethereum-rpc.publicnode.com"),
    explorer_url: "https://etherscan.io",
};

/// Sepolia testnet configuration.
pub const ETH_SEPOLIA: NetworkConfig = NetworkConfig {
    name: "Sepolia Testnet",
    chain_id: 11155111,
    rpc_url: Cow::Borrowed("https://ethereum-sepolia-rpc.publicnode.com"),
    explorer_url: "https://sepolia.etherscan.io",
};

/// Errors that can occur while talking to the registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("RPC error: {0}")]
    RpcError(String),

    #[error("Contract error: {0}")]
    ContractError(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}
