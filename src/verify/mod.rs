// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! # Address Verification Module
//!
//! Classifies a wallet address as unregistered, student, or university. The
//! decision itself lives behind [`DecisionPolicy`] so a real backend can be
//! substituted for the demo's random outcomes without touching the login
//! state machine.

pub mod decision;
pub mod service;

pub use decision::{AllowlistPolicy, DecisionPolicy, FixedPolicy, RandomPolicy, VerifyError};
pub use service::VerificationService;
