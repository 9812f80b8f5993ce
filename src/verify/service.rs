// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! Verification service: wraps a decision policy with the client's error
//! policy. Backend failures surface as notifications and resolve to the
//! "not registered" outcome; they are never fatal.

use std::sync::Arc;

use crate::models::{Role, VerificationResult, WhitelistResult};
use crate::notify::Notifier;

use super::decision::{DecisionPolicy, VerifyError};

#[derive(Clone)]
pub struct VerificationService {
    policy: Arc<dyn DecisionPolicy>,
    notifier: Arc<dyn Notifier>,
}

impl VerificationService {
    pub fn new(policy: Arc<dyn DecisionPolicy>, notifier: Arc<dyn Notifier>) -> Self {
        Self { policy, notifier }
    }

    /// Check whether an address is registered and resolve its role.
    ///
    /// Any backend error is reported to the user and collapsed to
    /// `{is_registered: false, role: None}`; this method never fails.
    pub async fn check_address_role(&self, address: &str) -> VerificationResult {
        match self.policy.registration(address).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(address, error = %e, "address verification failed");
                self.notifier.error("Failed to verify wallet address");
                VerificationResult::unregistered()
            }
        }
    }

    /// Raw registration check, errors included. The login flow uses this so
    /// the state machine can fall back to `Connected` on failure.
    pub async fn try_check_address_role(
        &self,
        address: &str,
    ) -> Result<VerificationResult, VerifyError> {
        self.policy.registration(address).await
    }

    /// Check whether an address is whitelisted. Same error policy as
    /// [`check_address_role`](Self::check_address_role).
    pub async fn check_whitelist_status(&self, address: &str) -> WhitelistResult {
        match self.policy.whitelist(address).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(address, error = %e, "whitelist check failed");
                self.notifier.error("Failed to check whitelist status");
                WhitelistResult {
                    is_whitelisted: false,
                    role: None,
                }
            }
        }
    }

    /// Register an address with the given role and metadata.
    ///
    /// Universities land in pending status (manual review); students are
    /// verified automatically. Returns whether the submission was accepted.
    pub async fn register_address(
        &self,
        address: &str,
        role: Option<Role>,
        metadata: &serde_json::Value,
    ) -> bool {
        let Some(role) = role else {
            self.notifier.error("Address and role are required");
            return false;
        };
        if address.is_empty() {
            self.notifier.error("Address and role are required");
            return false;
        }

        match self.policy.register(address, role, metadata).await {
            Ok(()) => {
                match role {
                    Role::University => self
                        .notifier
                        .success("University registration submitted for verification"),
                    Role::Student => self.notifier.success("Registration successful!"),
                }
                true
            }
            Err(e) => {
                tracing::warn!(address, %role, error = %e, "registration failed");
                self.notifier.error("Failed to register address");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::CaptureNotifier;
    use crate::verify::decision::FixedPolicy;

    fn service(
        policy: FixedPolicy,
    ) -> (VerificationService, Arc<CaptureNotifier>) {
        let notifier = Arc::new(CaptureNotifier::new());
        (
            VerificationService::new(Arc::new(policy), notifier.clone()),
            notifier,
        )
    }

    #[tokio::test]
    async fn backend_error_resolves_to_unregistered() {
        let (svc, notifier) = service(FixedPolicy::failing());

        let result = svc.check_address_role("0xabc").await;
        assert_eq!(result, VerificationResult::unregistered());
        assert_eq!(
            notifier.errors(),
            vec!["Failed to verify wallet address".to_string()]
        );
    }

    #[tokio::test]
    async fn registered_result_passes_through() {
        let (svc, notifier) = service(FixedPolicy::registered(Role::University));

        let result = svc.check_address_role("0xabc").await;
        assert!(result.is_registered);
        assert_eq!(result.role, Some(Role::University));
        assert!(notifier.is_empty());
    }

    #[tokio::test]
    async fn whitelist_error_resolves_to_not_whitelisted() {
        let (svc, notifier) = service(FixedPolicy::failing());

        let result = svc.check_whitelist_status("0xabc").await;
        assert!(!result.is_whitelisted);
        assert_eq!(result.role, None);
        assert_eq!(
            notifier.errors(),
            vec!["Failed to check whitelist status".to_string()]
        );
    }

    #[tokio::test]
    async fn register_requires_address_and_role() {
        let (svc, notifier) = service(FixedPolicy::registered(Role::Student));

        assert!(
            !svc.register_address("", Some(Role::Student), &serde_json::json!({}))
                .await
        );
        assert!(!svc.register_address("0xabc", None, &serde_json::json!({})).await);
        assert_eq!(notifier.errors().len(), 2);
    }

    #[tokio::test]
    async fn register_reports_role_specific_success() {
        let (svc, notifier) = service(FixedPolicy::registered(Role::University));

        let accepted = svc
            .register_address(
                "0xabc",
                Some(Role::University),
                &serde_json::json!({"name": "Demo University"}),
            )
            .await;
        assert!(accepted);
        assert_eq!(
            notifier.successes(),
            vec!["University registration submitted for verification".to_string()]
        );
    }

    #[tokio::test]
    async fn register_failure_notifies_and_returns_false() {
        let (svc, notifier) = service(FixedPolicy::failing());

        let accepted = svc
            .register_address("0xabc", Some(Role::Student), &serde_json::json!({}))
            .await;
        assert!(!accepted);
        assert_eq!(
            notifier.errors(),
            vec!["Failed to register address".to_string()]
        );
    }
}
