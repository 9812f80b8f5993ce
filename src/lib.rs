// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! CertifyChain Core - Certificate Verification Client
//!
//! This crate is the headless core of a wallet-based certificate platform:
//! universities issue tamper-proof certificates as NFTs, students and
//! employers verify them. UI embeddings supply a wallet adapter, a router,
//! and a toast renderer; everything else lives here.
//!
//! ## Modules
//!
//! - `auth` - Wallet login state machine and flow
//! - `session` - Persisted session record
//! - `verify` - Address verification and registration
//! - `registry` - Certificate registry contract (alloy)
//! - `pinning` - Content-addressed uploads (Pinata)
//! - `workflows` - Multi-step operations (certificate minting)

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod nav;
pub mod notify;
pub mod pinning;
pub mod registry;
pub mod session;
pub mod state;
pub mod verify;
pub mod wallet;
pub mod workflows;
