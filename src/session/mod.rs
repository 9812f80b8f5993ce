// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! # Session Module
//!
//! The client-held record of the current authenticated user: address, role,
//! display name, and verification status. One record, one writer, persisted
//! as a single JSON document under the well-known storage key and replaced
//! atomically on every write.

pub mod persist;
pub mod store;

pub use persist::{FileBackend, MemoryBackend, SessionBackend, SessionError};
pub use store::{SessionService, SessionState, SessionUpdate, WalletSync};
