// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! Read-only access to the certificate registry.

use std::str::FromStr;

use alloy::{
    network::Ethereum,
    primitives::{Address, U256},
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, ProviderBuilder, RootProvider,
    },
};

use crate::config::{REGISTRY_CONTRACT_ADDRESS_ENV, REGISTRY_RPC_URL_ENV};
use crate::models::Certificate;

use super::contract::{record_to_certificate, ICertificateRegistry};
use super::types::{NetworkConfig, RegistryError};

/// HTTP provider type for registry reads (with all fillers).
type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

/// Read-only registry client.
pub struct RegistryReader {
    network: NetworkConfig,
    contract: ICertificateRegistry::ICertificateRegistryInstance<HttpProvider>,
}

impl RegistryReader {
    /// Create a reader for the given network and registry contract.
    pub fn new(network: NetworkConfig, contract_address: &str) -> Result<Self, RegistryError> {
        let address = Address::from_str(contract_address)
            .map_err(|e| RegistryError::InvalidAddress(e.to_string()))?;

        let url: url::Url = network
            .rpc_url
            .parse()
            .map_err(|e: url::ParseError| RegistryError::InvalidRpcUrl(e.to_string()))?;
        let provider = ProviderBuilder::new().connect_http(url);

        Ok(Self {
            network,
            contract: ICertificateRegistry::new(address, provider),
        })
    }

    /// Create a reader from `REGISTRY_CONTRACT_ADDRESS` (and optionally
    /// `REGISTRY_RPC_URL`, falling back to the network default).
    pub fn from_env(mut network: NetworkConfig) -> Result<Self, RegistryError> {
        if let Ok(rpc_url) = std::env::var(REGISTRY_RPC_URL_ENV) {
            network.rpc_url = rpc_url.into();
        }
        let contract_address = std::env::var(REGISTRY_CONTRACT_ADDRESS_ENV)
            .map_err(|_| RegistryError::MissingConfig(REGISTRY_CONTRACT_ADDRESS_ENV.to_string()))?;
        Self::new(network, &contract_address)
    }

    /// All token ids known to the registry.
    pub async fn all_certificate_ids(&self) -> Result<Vec<u64>, RegistryError> {
        let ids = self
            .contract
            .getAllCertificates()
            .call()
            .await
            .map_err(|e| RegistryError::ContractError(e.to_string()))?;
        Self::into_token_ids(ids)
    }

    /// Token ids owned by an address.
    pub async fn certificate_ids_for(&self, owner: &str) -> Result<Vec<u64>, RegistryError> {
        let owner = Address::from_str(owner)
            .map_err(|e| RegistryError::InvalidAddress(e.to_string()))?;
        let ids = self
            .contract
            .getCertificatesByOwner(owner)
            .call()
            .await
            .map_err(|e| RegistryError::ContractError(e.to_string()))?;
        Self::into_token_ids(ids)
    }

    /// Fetch one certificate record.
    pub async fn certificate_detail(&self, token_id: u64) -> Result<Certificate, RegistryError> {
        let data = self
            .contract
            .getCertificate(U256::from(token_id))
            .call()
            .await
            .map_err(|e| RegistryError::ContractError(e.to_string()))?;
        record_to_certificate(U256::from(token_id), data)
    }

    /// Fetch all certificates owned by an address.
    ///
    /// A record that fails to load is skipped with a warning so one bad
    /// token never blanks the whole dashboard.
    pub async fn certificates_for(&self, owner: &str) -> Result<Vec<Certificate>, RegistryError> {
        let ids = self.certificate_ids_for(owner).await?;

        let mut certificates = Vec::with_capacity(ids.len());
        for token_id in ids {
            match self.certificate_detail(token_id).await {
                Ok(certificate) => certificates.push(certificate),
                Err(e) => {
                    tracing::warn!(token_id, error = %e, "failed to load certificate record");
                }
            }
        }
        Ok(certificates)
    }

    /// Metadata URI recorded for a token.
    pub async fn metadata_uri(&self, token_id: u64) -> Result<String, RegistryError> {
        self.contract
            .tokenURI(U256::from(token_id))
            .call()
            .await
            .map_err(|e| RegistryError::ContractError(e.to_string()))
    }

    /// Get the network configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    fn into_token_ids(ids: Vec<U256>) -> Result<Vec<u64>, RegistryError> {
        ids.into_iter()
            .map(|id| {
                u64::try_from(id)
                    .map_err(|_| RegistryError::ContractError(format!("token id out of range: {id}")))
            })
            .collect()
    }
}
