// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names, well-known keys, and
//! timing defaults used throughout the client. Configuration is loaded from
//! the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Directory for the persisted session record | `.` |
//! | `PINATA_API_KEY` | Pinning service API key | Required for uploads |
//! | `PINATA_SECRET_API_KEY` | Pinning service API secret | Required for uploads |
//! | `PINATA_API_BASE_URL` | Pinning service base URL | `https://api.pinata.cloud/pinning` |
//! | `REGISTRY_RPC_URL` | Registry chain RPC endpoint | Network default |
//! | `REGISTRY_CONTRACT_ADDRESS` | Certificate registry contract | Required for registry calls |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::time::Duration;

/// Environment variable name for the session data directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Well-known key under which the session record is persisted.
///
/// The record is a single JSON document with fields
/// `{role, status, name, address}`; it is read once at startup, rewritten
/// after every mutation that sets an address, and removed on logout.
pub const SESSION_STORAGE_KEY: &str = "userInfo";

/// Environment variable name for the certificate registry contract address.
pub const REGISTRY_CONTRACT_ADDRESS_ENV: &str = "REGISTRY_CONTRACT_ADDRESS";

/// Environment variable name for the registry chain RPC endpoint.
pub const REGISTRY_RPC_URL_ENV: &str = "REGISTRY_RPC_URL";

/// Delay before a post-login redirect fires. Long enough for the user to
/// read the success/failure notice, short enough not to feel stuck.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Artificial round-trip latency of the mock verification backend.
pub const VERIFY_DELAY: Duration = Duration::from_millis(1000);

/// Artificial round-trip latency of the mock registration call.
pub const REGISTER_DELAY: Duration = Duration::from_millis(1500);
