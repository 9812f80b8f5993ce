// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! Certificate registry contract interface.

use alloy::{primitives::U256, sol};

use crate::models::Certificate;

use super::types::RegistryError;

// Define the registry interface using alloy's sol! macro
sol! {
    #[sol(rpc)]
    interface ICertificateRegistry {
        struct CertificateData {
            string title;
            string issuingOrg;
            string recipientName;
            address recipient;
            string issueDate;
            string expiryDate;
            string description;
            string certificateId;
        }

        function getAllCertificates() external view returns (uint256[] memory);
        function getCertificatesByOwner(address owner) external view returns (uint256[] memory);
        function getCertificate(uint256 tokenId) external view returns (CertificateData memory);
        function tokenURI(uint256 tokenId) external view returns (string memory);
        function issueCertificate(
            address recipient,
            string certificateId,
            string title,
            string recipientName,
            string issueDate,
            string description,
            string uri
        ) external returns (uint256);
    }
}

/// Map an on-chain record into the client-side certificate type.
///
/// The contract stores the expiry date as an empty string when none was set.
pub fn record_to_certificate(
    token_id: U256,
    data: ICertificateRegistry::CertificateData,
) -> Result<Certificate, RegistryError> {
    let token_id = u64::try_from(token_id)
        .map_err(|_| RegistryError::ContractError(format!("token id out of range: {token_id}")))?;

    let expiry_date = if data.expiryDate.is_empty() {
        None
    } else {
        Some(data.expiryDate)
    };

    Ok(Certificate {
        token_id,
        title: data.title,
        issuing_org: data.issuingOrg,
        recipient_name: data.recipientName,
        recipient_address: format!("{:?}", data.recipient),
        issue_date: data.issueDate,
        expiry_date,
        description: data.description,
        certificate_id: data.certificateId,
        transaction_hash: None,
        block_number: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    fn sample_record() -> ICertificateRegistry::CertificateData {
        ICertificateRegistry::CertificateData {
            title: "Bachelor of Computer Science".to_string(),
            issuingOrg: "Demo University".to_string(),
            recipientName: "Alex Doe".to_string(),
            recipient: Address::ZERO,
            issueDate: "2025-06-01".to_string(),
            expiryDate: String::new(),
            description: "First class honours".to_string(),
            certificateId: "2025-CS-001".to_string(),
        }
    }

    #[test]
    fn maps_record_fields() {
        let certificate = record_to_certificate(U256::from(7u64), sample_record()).unwrap();
        assert_eq!(certificate.token_id, 7);
        assert_eq!(certificate.title, "Bachelor of Computer Science");
        assert_eq!(certificate.certificate_id, "2025-CS-001");
        assert_eq!(certificate.transaction_hash, None);
    }

    #[test]
    fn empty_expiry_becomes_none() {
        let certificate = record_to_certificate(U256::from(1u64), sample_record()).unwrap();
        assert_eq!(certificate.expiry_date, None);

        let mut record = sample_record();
        record.expiryDate = "2030-06-01".to_string();
        let certificate = record_to_certificate(U256::from(1u64), record).unwrap();
        assert_eq!(certificate.expiry_date.as_deref(), Some("2030-06-01"));
    }

    #[test]
    fn oversized_token_id_is_rejected() {
        let result = record_to_certificate(U256::MAX, sample_record());
        assert!(matches!(result, Err(RegistryError::ContractError(_))));
    }
}
