// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! Core domain types shared across the client.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// User roles governing which dashboard and permissions apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Issuing institution; can mint certificates.
    University,
    /// Certificate recipient; read-only dashboard.
    Student,
}

impl Role {
    /// Parse role from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Role> {
        match s.to_lowercase().as_str() {
            "university" => Some(Role::University),
            "student" => Some(Role::Student),
            _ => None,
        }
    }

    /// Verification status granted on registration.
    ///
    /// Universities need manual review before issuing, so they start out
    /// pending; student registrations are verified automatically.
    pub fn registration_status(&self) -> VerificationStatus {
        match self {
            Role::University => VerificationStatus::Pending,
            Role::Student => VerificationStatus::Verified,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::University => write!(f, "university"),
            Role::Student => write!(f, "student"),
        }
    }
}

/// Verification state of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Submitted, awaiting manual review.
    Pending,
    /// Address verified for its role.
    Verified,
    /// Review rejected the address.
    Rejected,
}

/// Result of an address-role check. Transient, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationResult {
    /// Whether the address is known to the verification backend.
    pub is_registered: bool,
    /// Resolved role, when registered.
    pub role: Option<Role>,
}

impl VerificationResult {
    /// The outcome every internal verification error collapses to.
    pub fn unregistered() -> Self {
        Self {
            is_registered: false,
            role: None,
        }
    }
}

/// Result of a whitelist check. Transient, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhitelistResult {
    /// Whether the address is whitelisted.
    pub is_whitelisted: bool,
    /// Resolved role, when whitelisted.
    pub role: Option<Role>,
}

/// A certificate as read from the external registry contract.
///
/// The registry owns these records; this client only renders them and
/// requests creation of new ones via [`MintRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// Registry token identifier.
    pub token_id: u64,
    /// Certificate title (e.g. "Bachelor of Computer Science").
    pub title: String,
    /// Issuing organization name.
    pub issuing_org: String,
    /// Recipient display name.
    pub recipient_name: String,
    /// Recipient wallet address.
    pub recipient_address: String,
    /// Issue date as recorded on the registry.
    pub issue_date: String,
    /// Optional expiry date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    /// Free-form description / achievements.
    pub description: String,
    /// Issuer-assigned certificate number (e.g. "2025-CS-001").
    pub certificate_id: String,
    /// Transaction hash of the mint, when known from a local receipt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    /// Block number of the mint, when known from a local receipt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
}

/// A single mint submission. Constructed client-side, submitted once,
/// never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    /// Recipient wallet address.
    pub recipient_address: String,
    /// Issuer-assigned certificate number.
    pub certificate_id: String,
    /// Certificate title.
    pub title: String,
    /// Recipient display name.
    pub recipient_name: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Free-form description.
    pub description: String,
    /// Content-addressed URI of the pinned metadata document.
    pub metadata_uri: String,
}

/// Receipt returned by a successful mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    /// Transaction hash.
    pub tx_hash: String,
    /// Block number where the transaction was included.
    pub block_number: u64,
    /// Explorer URL for the transaction.
    pub explorer_url: String,
}

/// Metadata document pinned alongside the certificate file.
///
/// Follows the common NFT metadata shape so wallets and marketplaces can
/// render minted certificates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateMetadata {
    /// Display name (the certificate title).
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Content-addressed URI of the certificate file.
    pub image: String,
    /// Structured attributes (issuer, certificate id, dates).
    pub attributes: Vec<MetadataAttribute>,
}

/// One `trait_type`/`value` pair in the metadata document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataAttribute {
    pub trait_type: String,
    pub value: String,
}

impl MetadataAttribute {
    pub fn new(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_from_str_parses_correctly() {
        assert_eq!(Role::from_str("university"), Some(Role::University));
        assert_eq!(Role::from_str("UNIVERSITY"), Some(Role::University));
        assert_eq!(Role::from_str("Student"), Some(Role::Student));
        assert_eq!(Role::from_str("admin"), None);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Role::University).unwrap(),
            r#""university""#
        );
        assert_eq!(
            serde_json::to_string(&Role::Student).unwrap(),
            r#""student""#
        );
    }

    #[test]
    fn registration_status_depends_on_role() {
        assert_eq!(
            Role::University.registration_status(),
            VerificationStatus::Pending
        );
        assert_eq!(
            Role::Student.registration_status(),
            VerificationStatus::Verified
        );
    }

    #[test]
    fn unregistered_result_has_no_role() {
        let result = VerificationResult::unregistered();
        assert!(!result.is_registered);
        assert_eq!(result.role, None);
    }

    #[test]
    fn certificate_omits_absent_receipt_fields() {
        let certificate = Certificate {
            token_id: 1,
            title: "Bachelor of Computer Science".to_string(),
            issuing_org: "Demo University".to_string(),
            recipient_name: "Alex Doe".to_string(),
            recipient_address: "0xabc".to_string(),
            issue_date: "2025-06-01".to_string(),
            expiry_date: None,
            description: String::new(),
            certificate_id: "2025-CS-001".to_string(),
            transaction_hash: None,
            block_number: None,
        };

        let json = serde_json::to_string(&certificate).unwrap();
        assert!(!json.contains("transaction_hash"));
        assert!(!json.contains("expiry_date"));
    }
}
