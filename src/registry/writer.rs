// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! Mint submissions to the certificate registry.

use std::str::FromStr;

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::Address,
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
        Identity, ProviderBuilder, RootProvider,
    },
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;

use crate::models::{MintReceipt, MintRequest};

use super::contract::ICertificateRegistry;
use super::types::{NetworkConfig, RegistryError};

/// HTTP provider type for registry writes (fillers plus a signing wallet).
type SigningProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
>;

/// A component that can submit a mint and return its receipt.
#[async_trait]
pub trait CertificateMinter: Send + Sync {
    async fn mint(&self, request: &MintRequest) -> Result<MintReceipt, RegistryError>;
}

/// Signing registry client.
pub struct RegistryWriter {
    network: NetworkConfig,
    contract: ICertificateRegistry::ICertificateRegistryInstance<SigningProvider>,
}

impl RegistryWriter {
    /// Create a writer for the given network, registry contract, and wallet.
    pub fn new(
        network: NetworkConfig,
        contract_address: &str,
        wallet: EthereumWallet,
    ) -> Result<Self, RegistryError> {
        let address = Address::from_str(contract_address)
            .map_err(|e| RegistryError::InvalidAddress(e.to_string()))?;

        let url: url::Url = network
            .rpc_url
            .parse()
            .map_err(|e: url::ParseError| RegistryError::InvalidRpcUrl(e.to_string()))?;
        let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

        Ok(Self {
            network,
            contract: ICertificateRegistry::new(address, provider),
        })
    }

    /// Create a signer from a private key (hex string without 0x prefix).
    pub fn signer_from_hex(private_key_hex: &str) -> Result<PrivateKeySigner, RegistryError> {
        let key_bytes = alloy::hex::decode(private_key_hex)
            .map_err(|e| RegistryError::InvalidPrivateKey(e.to_string()))?;

        PrivateKeySigner::from_slice(&key_bytes)
            .map_err(|e| RegistryError::InvalidPrivateKey(e.to_string()))
    }

    /// Get the network configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }
}

#[async_trait]
impl CertificateMinter for RegistryWriter {
    async fn mint(&self, request: &MintRequest) -> Result<MintReceipt, RegistryError> {
        let recipient = Address::from_str(&request.recipient_address)
            .map_err(|e| RegistryError::InvalidAddress(e.to_string()))?;

        let pending = self
            .contract
            .issueCertificate(
                recipient,
                request.certificate_id.clone(),
                request.title.clone(),
                request.recipient_name.clone(),
                request.issue_date.format("%Y-%m-%d").to_string(),
                request.description.clone(),
                request.metadata_uri.clone(),
            )
            .send()
            .await
            .map_err(|e| RegistryError::TransactionFailed(format!("Failed to send: {}", e)))?;

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| RegistryError::TransactionFailed(format!("Failed to confirm: {}", e)))?;

        if !receipt.status() {
            return Err(RegistryError::TransactionFailed(
                "mint transaction reverted".to_string(),
            ));
        }

        let tx_hash = format!("{:?}", receipt.transaction_hash);
        let explorer_url = format!("{}/tx/{}", self.network.explorer_url, tx_hash);

        Ok(MintReceipt {
            tx_hash,
            block_number: receipt.block_number.unwrap_or(0),
            explorer_url,
        })
    }
}
