// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! # Auth Module
//!
//! Wallet-based login. A pure state machine ([`machine`]) owns the
//! transition table; the async flow ([`flow`]) wires it to the wallet
//! adapter, the verification service, the session store, and navigation.

pub mod flow;
pub mod machine;

pub use flow::{LoginFlow, LoginOutcome};
pub use machine::{Effect, LoginEvent, LoginMachine, LoginState};
