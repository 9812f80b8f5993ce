// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! Wallet connection adapter.
//!
//! Wraps the external wallet-connection capability. The core only observes
//! the connected address; connection management, retries, and backoff are
//! entirely delegated to the external capability.

use std::sync::Mutex;

/// Snapshot of the wallet connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletStatus {
    /// Connected account address, when available.
    pub address: Option<String>,
    /// Whether a wallet session is active.
    pub is_connected: bool,
}

impl WalletStatus {
    /// The connected address, or `None` while disconnected.
    pub fn connected_address(&self) -> Option<&str> {
        if self.is_connected {
            self.address.as_deref()
        } else {
            None
        }
    }
}

/// The wallet seam. A UI embedding backs this with its wallet-connection
/// library; the core never initiates connections itself.
pub trait WalletConnection: Send + Sync {
    fn status(&self) -> WalletStatus;
}

/// Settable in-process wallet, for tests and headless runs.
#[derive(Debug, Default)]
pub struct StaticWallet {
    status: Mutex<WalletStatus>,
}

impl StaticWallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connected(address: impl Into<String>) -> Self {
        let wallet = Self::new();
        wallet.connect(address);
        wallet
    }

    pub fn connect(&self, address: impl Into<String>) {
        let mut status = self.status.lock().expect("wallet lock poisoned");
        status.address = Some(address.into());
        status.is_connected = true;
    }

    pub fn disconnect(&self) {
        let mut status = self.status.lock().expect("wallet lock poisoned");
        status.address = None;
        status.is_connected = false;
    }
}

impl WalletConnection for StaticWallet {
    fn status(&self) -> WalletStatus {
        self.status.lock().expect("wallet lock poisoned").clone()
    }
}
