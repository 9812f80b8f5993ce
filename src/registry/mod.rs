// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! # Certificate Registry Module
//!
//! Typed access to the external certificate registry contract. Reads list
//! and resolve certificate records; writes submit a single mint per request
//! and wait for the receipt. Mint failures surface verbatim so the issuing
//! view can show the underlying reason.

pub mod contract;
pub mod reader;
pub mod types;
pub mod writer;

pub use contract::record_to_certificate;
pub use reader::RegistryReader;
pub use types::{NetworkConfig, RegistryError, ETH_MAINNET, ETH_SEPOLIA};
pub use writer::{CertificateMinter, RegistryWriter};
