// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! # Workflows Module
//!
//! Multi-step user operations composed from the gateway modules.

pub mod mint;

pub use mint::{CertificateForm, MintOutcome, MintWorkflow, UploadFile};
