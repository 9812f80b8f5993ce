// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! Pluggable decision functions for address verification.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::config::{REGISTER_DELAY, VERIFY_DELAY};
use crate::models::{Role, VerificationResult, WhitelistResult};

/// Errors raised by a decision backend.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("verification backend error: {0}")]
    Backend(String),
}

/// The decision seam. Implementations answer registration, whitelist, and
/// registration-submission questions for an address.
#[async_trait]
pub trait DecisionPolicy: Send + Sync {
    /// Is this address registered, and as what role?
    async fn registration(&self, address: &str) -> Result<VerificationResult, VerifyError>;

    /// Is this address whitelisted, and as what role?
    async fn whitelist(&self, address: &str) -> Result<WhitelistResult, VerifyError>;

    /// Submit a registration for this address.
    async fn register(
        &self,
        address: &str,
        role: Role,
        metadata: &serde_json::Value,
    ) -> Result<(), VerifyError>;
}

/// Demo policy: fixed artificial latency and uniformly random outcomes.
///
/// An address counts as registered (or whitelisted) when a uniform roll
/// exceeds 0.3, and resolves to university rather than student when a second
/// roll exceeds 0.5.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    check_delay: Duration,
    register_delay: Duration,
}

const REGISTERED_THRESHOLD: f64 = 0.3;
const UNIVERSITY_THRESHOLD: f64 = 0.5;

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            check_delay: VERIFY_DELAY,
            register_delay: REGISTER_DELAY,
        }
    }

    /// Override the artificial delays (tests use zero).
    pub fn with_delays(check_delay: Duration, register_delay: Duration) -> Self {
        Self {
            check_delay,
            register_delay,
        }
    }

    fn roll_outcome() -> (bool, Option<Role>) {
        let mut rng = rand::thread_rng();
        let accepted = rng.gen::<f64>() > REGISTERED_THRESHOLD;
        let role = if accepted {
            if rng.gen::<f64>() > UNIVERSITY_THRESHOLD {
                Some(Role::University)
            } else {
                Some(Role::Student)
            }
        } else {
            None
        };
        (accepted, role)
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DecisionPolicy for RandomPolicy {
    async fn registration(&self, _address: &str) -> Result<VerificationResult, VerifyError> {
        tokio::time::sleep(self.check_delay).await;
        let (is_registered, role) = Self::roll_outcome();
        Ok(VerificationResult {
            is_registered,
            role,
        })
    }

    async fn whitelist(&self, _address: &str) -> Result<WhitelistResult, VerifyError> {
        tokio::time::sleep(self.check_delay).await;
        let (is_whitelisted, role) = Self::roll_outcome();
        Ok(WhitelistResult {
            is_whitelisted,
            role,
        })
    }

    async fn register(
        &self,
        _address: &str,
        _role: Role,
        _metadata: &serde_json::Value,
    ) -> Result<(), VerifyError> {
        tokio::time::sleep(self.register_delay).await;
        Ok(())
    }
}

/// Deterministic policy for tests.
#[derive(Debug, Clone)]
pub struct FixedPolicy {
    registered_role: Option<Role>,
    fail: bool,
}

impl FixedPolicy {
    /// Every address resolves as registered with the given role.
    pub fn registered(role: Role) -> Self {
        Self {
            registered_role: Some(role),
            fail: false,
        }
    }

    /// Every address resolves as unregistered.
    pub fn unregistered() -> Self {
        Self {
            registered_role: None,
            fail: false,
        }
    }

    /// Every call fails with a backend error.
    pub fn failing() -> Self {
        Self {
            registered_role: None,
            fail: true,
        }
    }

    fn check(&self) -> Result<(), VerifyError> {
        if self.fail {
            Err(VerifyError::Backend(
                "decision backend unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DecisionPolicy for FixedPolicy {
    async fn registration(&self, _address: &str) -> Result<VerificationResult, VerifyError> {
        self.check()?;
        Ok(VerificationResult {
            is_registered: self.registered_role.is_some(),
            role: self.registered_role,
        })
    }

    async fn whitelist(&self, _address: &str) -> Result<WhitelistResult, VerifyError> {
        self.check()?;
        Ok(WhitelistResult {
            is_whitelisted: self.registered_role.is_some(),
            role: self.registered_role,
        })
    }

    async fn register(
        &self,
        _address: &str,
        _role: Role,
        _metadata: &serde_json::Value,
    ) -> Result<(), VerifyError> {
        self.check()
    }
}

/// Policy backed by a fixed set of university addresses; everything else is
/// a student. Addresses compare case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct AllowlistPolicy {
    universities: HashSet<String>,
}

impl AllowlistPolicy {
    pub fn new<I, S>(universities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            universities: universities
                .into_iter()
                .map(|s| s.into().to_lowercase())
                .collect(),
        }
    }

    fn classify(&self, address: &str) -> Role {
        if self.universities.contains(&address.to_lowercase()) {
            Role::University
        } else {
            Role::Student
        }
    }
}

#[async_trait]
impl DecisionPolicy for AllowlistPolicy {
    async fn registration(&self, address: &str) -> Result<VerificationResult, VerifyError> {
        Ok(VerificationResult {
            is_registered: true,
            role: Some(self.classify(address)),
        })
    }

    async fn whitelist(&self, address: &str) -> Result<WhitelistResult, VerifyError> {
        Ok(WhitelistResult {
            is_whitelisted: true,
            role: Some(self.classify(address)),
        })
    }

    async fn register(
        &self,
        _address: &str,
        _role: Role,
        _metadata: &serde_json::Value,
    ) -> Result<(), VerifyError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_policy_is_deterministic() {
        let policy = FixedPolicy::registered(Role::Student);
        let result = policy.registration("0xabc").await.unwrap();
        assert!(result.is_registered);
        assert_eq!(result.role, Some(Role::Student));

        let policy = FixedPolicy::unregistered();
        let result = policy.registration("0xabc").await.unwrap();
        assert_eq!(result, VerificationResult::unregistered());
    }

    #[tokio::test]
    async fn failing_policy_errors_everywhere() {
        let policy = FixedPolicy::failing();
        assert!(policy.registration("0xabc").await.is_err());
        assert!(policy.whitelist("0xabc").await.is_err());
        assert!(policy
            .register("0xabc", Role::Student, &serde_json::json!({}))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn allowlist_classifies_case_insensitively() {
        let policy = AllowlistPolicy::new(["0xAAA"]);

        let uni = policy.registration("0xaaa").await.unwrap();
        assert_eq!(uni.role, Some(Role::University));

        let student = policy.registration("0xbbb").await.unwrap();
        assert!(student.is_registered);
        assert_eq!(student.role, Some(Role::Student));
    }

    #[tokio::test]
    async fn random_policy_yields_consistent_shape() {
        // Zero delays so the test completes quickly; outcomes are random but
        // must always pair a role with a positive result.
        let policy = RandomPolicy::with_delays(Duration::ZERO, Duration::ZERO);
        for _ in 0..50 {
            let result = policy.registration("0xabc").await.unwrap();
            assert_eq!(result.is_registered, result.role.is_some());
        }
    }
}
