// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! The certificate issuing pipeline.
//!
//! Upload the certificate file, upload a metadata document referencing it,
//! then submit the mint. Each step gates the next; a failure notifies the
//! user and stops without navigation. Already-pinned content is not removed
//! on a later failure, only logged.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::{CertificateMetadata, MetadataAttribute, MintReceipt, MintRequest};
use crate::nav::{Navigator, Route};
use crate::notify::Notifier;
use crate::pinning::{FilePinner, PinningError};
use crate::registry::CertificateMinter;

/// A file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// The issuing form as filled in by a university user.
///
/// `title`, `recipient_wallet`, `issue_date`, and the file are required;
/// everything else is free-form.
#[derive(Debug, Clone, Default)]
pub struct CertificateForm {
    pub title: String,
    pub recipient_name: String,
    pub recipient_wallet: String,
    pub issuing_org: String,
    pub certificate_id: String,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub description: String,
    pub file: Option<UploadFile>,
}

/// What one run of the pipeline amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintOutcome {
    /// Form validation failed; nothing was uploaded.
    Rejected,
    /// A pipeline step failed after validation. The user was notified with
    /// this message.
    Failed(String),
    /// Certificate minted.
    Minted(MintReceipt),
}

pub struct MintWorkflow {
    pinner: Arc<dyn FilePinner>,
    minter: Arc<dyn CertificateMinter>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl MintWorkflow {
    pub fn new(
        pinner: Arc<dyn FilePinner>,
        minter: Arc<dyn CertificateMinter>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            pinner,
            minter,
            navigator,
            notifier,
        }
    }

    /// Run the full pipeline for one form submission.
    pub async fn run(&self, mut form: CertificateForm) -> MintOutcome {
        let issue_date = match form.issue_date {
            Some(date)
                if !form.title.trim().is_empty() && !form.recipient_wallet.trim().is_empty() =>
            {
                date
            }
            _ => {
                self.notifier.error("Please fill all required fields");
                return MintOutcome::Rejected;
            }
        };
        let Some(file) = form.file.take() else {
            self.notifier.error("Please upload a certificate file");
            return MintOutcome::Rejected;
        };

        let file_uri = match self.pinner.pin_file(&file.name, file.bytes).await {
            Ok(uri) => uri,
            Err(e) => return self.fail_upload("certificate file", e),
        };

        let metadata = build_metadata(&form, issue_date, &file_uri);
        let document = match serde_json::to_value(&metadata) {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize certificate metadata");
                let message = "Failed to upload certificate metadata. Please try again.";
                self.notifier.error(message);
                return MintOutcome::Failed(message.to_string());
            }
        };
        let metadata_uri = match self.pinner.pin_json(&document).await {
            Ok(uri) => uri,
            Err(e) => {
                // The file pin stays behind; content-addressed storage makes
                // the orphan harmless.
                tracing::warn!(%file_uri, "metadata upload failed, pinned file left in place");
                return self.fail_upload("certificate metadata", e);
            }
        };

        let request = MintRequest {
            recipient_address: form.recipient_wallet.clone(),
            certificate_id: form.certificate_id.clone(),
            title: form.title.clone(),
            recipient_name: form.recipient_name.clone(),
            issue_date,
            description: form.description.clone(),
            metadata_uri,
        };

        match self.minter.mint(&request).await {
            Ok(receipt) => {
                tracing::info!(tx_hash = %receipt.tx_hash, "certificate minted");
                self.notifier.success("Certificate successfully minted as NFT!");
                self.navigator.navigate(Route::Dashboard);
                MintOutcome::Minted(receipt)
            }
            Err(e) => {
                // Mint errors reach the user verbatim; the revert reason is
                // the only actionable detail they have.
                let message = e.to_string();
                tracing::warn!(error = %message, "mint submission failed");
                self.notifier.error(&message);
                MintOutcome::Failed(message)
            }
        }
    }

    fn fail_upload(&self, what: &str, error: PinningError) -> MintOutcome {
        tracing::warn!(error = %error, "failed to upload {what}");
        let message = format!("Failed to upload {what}. Please try again.");
        self.notifier.error(&message);
        MintOutcome::Failed(message)
    }
}

/// Build the metadata document pinned alongside the certificate file.
fn build_metadata(form: &CertificateForm, issue_date: NaiveDate, file_uri: &str) -> CertificateMetadata {
    let mut attributes = vec![
        MetadataAttribute::new("Issuer", form.issuing_org.clone()),
        MetadataAttribute::new("Certificate ID", form.certificate_id.clone()),
        MetadataAttribute::new("Recipient", form.recipient_name.clone()),
        MetadataAttribute::new("Issue Date", issue_date.format("%Y-%m-%d").to_string()),
    ];
    if let Some(expiry) = form.expiry_date {
        attributes.push(MetadataAttribute::new(
            "Expiry Date",
            expiry.format("%Y-%m-%d").to_string(),
        ));
    }

    CertificateMetadata {
        name: form.title.clone(),
        description: form.description.clone(),
        image: file_uri.to_string(),
        attributes,
    }
}
