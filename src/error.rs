// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! Crate-level error type.
//!
//! Module boundaries keep their own error enums; this aggregate exists for
//! callers composing several gateways in one operation. The boundary policy
//! is that no workflow error is fatal: everything converts into a
//! user-visible notification.

use crate::notify::Notification;
use crate::pinning::PinningError;
use crate::registry::RegistryError;
use crate::session::SessionError;
use crate::verify::VerifyError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No wallet connected")]
    WalletNotConnected,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error(transparent)]
    Pinning(#[from] PinningError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl AppError {
    /// Render this error as the notification shown to the user.
    pub fn into_notification(self) -> Notification {
        Notification::error(self.to_string())
    }
}
