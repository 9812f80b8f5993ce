// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! Pinata integration for content-addressed certificate storage.
//!
//! Two uploads per certificate: the file itself, then a JSON metadata
//! document referencing it. Each returns an IPFS hash which the registry
//! stores as an `ipfs://` URI.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

const DEFAULT_API_BASE_URL: &str = "https://api.pinata.cloud/pinning";
const DEFAULT_GATEWAY_BASE_URL: &str = "https://gateway.pinata.cloud/ipfs";

const API_KEY_HEADER: &str = "pinata_api_key";
const SECRET_KEY_HEADER: &str = "pinata_secret_api_key";

#[derive(Debug, thiserror::Error)]
pub enum PinningError {
    #[error("Pinning configuration missing: {0}")]
    MissingConfig(String),

    #[error("Pinning request failed: {0}")]
    Request(String),

    #[error("Pinning response was invalid: {0}")]
    InvalidResponse(String),
}

/// A service that pins content and returns its `ipfs://` URI.
#[async_trait]
pub trait FilePinner: Send + Sync {
    /// Pin raw file bytes; returns the content-addressed URI.
    async fn pin_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, PinningError>;

    /// Pin a JSON document; returns the content-addressed URI.
    async fn pin_json(&self, document: &Value) -> Result<String, PinningError>;
}

/// Content-addressed URI for a pinned hash.
pub fn ipfs_uri(hash: &str) -> String {
    format!("ipfs://{hash}")
}

/// HTTP gateway URL for a pinned hash or `ipfs://` URI, for display and
/// download links.
pub fn gateway_url(hash_or_uri: &str) -> String {
    let hash = hash_or_uri.strip_prefix("ipfs://").unwrap_or(hash_or_uri);
    format!("{DEFAULT_GATEWAY_BASE_URL}/{hash}")
}

#[derive(Debug, Clone)]
pub struct PinataClient {
    api_base_url: String,
    api_key: String,
    secret_api_key: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

impl PinataClient {
    pub fn is_configured() -> bool {
        env_optional("PINATA_API_KEY").is_some() && env_optional("PINATA_SECRET_API_KEY").is_some()
    }

    pub fn from_env() -> Result<Self, PinningError> {
        let api_base_url = env_or_default("PINATA_API_BASE_URL", DEFAULT_API_BASE_URL);
        let api_key = env_required("PINATA_API_KEY")?;
        let secret_api_key = env_required("PINATA_SECRET_API_KEY")?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PinningError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_base_url,
            api_key,
            secret_api_key,
            http,
        })
    }

    async fn extract_hash(response: reqwest::Response) -> Result<String, PinningError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PinningError::Request(format!(
                "pinning service returned {status}: {body}"
            )));
        }

        let parsed: PinResponse = response
            .json()
            .await
            .map_err(|e| PinningError::InvalidResponse(e.to_string()))?;
        if parsed.ipfs_hash.is_empty() {
            return Err(PinningError::InvalidResponse(
                "empty IpfsHash in response".to_string(),
            ));
        }
        Ok(parsed.ipfs_hash)
    }
}

#[async_trait]
impl FilePinner for PinataClient {
    async fn pin_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, PinningError> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/pinFileToIPFS", self.api_base_url))
            .header(API_KEY_HEADER, &self.api_key)
            .header(SECRET_KEY_HEADER, &self.secret_api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PinningError::Request(e.to_string()))?;

        let hash = Self::extract_hash(response).await?;
        tracing::info!(file_name, %hash, "pinned certificate file");
        Ok(ipfs_uri(&hash))
    }

    async fn pin_json(&self, document: &Value) -> Result<String, PinningError> {
        let response = self
            .http
            .post(format!("{}/pinJSONToIPFS", self.api_base_url))
            .header(API_KEY_HEADER, &self.api_key)
            .header(SECRET_KEY_HEADER, &self.secret_api_key)
            .json(document)
            .send()
            .await
            .map_err(|e| PinningError::Request(e.to_string()))?;

        let hash = Self::extract_hash(response).await?;
        tracing::info!(%hash, "pinned metadata document");
        Ok(ipfs_uri(&hash))
    }
}

fn env_required(name: &str) -> Result<String, PinningError> {
    env_optional(name).ok_or_else(|| PinningError::MissingConfig(name.to_string()))
}

fn env_optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    env_optional(name).unwrap_or_else(|| default.to_string())
}
