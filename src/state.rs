// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! Application context: the dependency-injected service bundle.
//!
//! Everything is constructed explicitly and passed in; no globals. A UI
//! embedding supplies its own wallet adapter, navigator, and notifier, then
//! drives the lifecycle: [`startup`](AppContext::startup) once, user actions
//! through the services, [`teardown`](AppContext::teardown) on exit.

use std::sync::Arc;

use crate::auth::LoginFlow;
use crate::models::Role;
use crate::nav::{Navigator, RecordingNavigator};
use crate::notify::{Notifier, TracingNotifier};
use crate::session::{FileBackend, SessionBackend, SessionService, SessionUpdate};
use crate::verify::{DecisionPolicy, RandomPolicy, VerificationService};
use crate::wallet::{StaticWallet, WalletConnection};

#[derive(Clone)]
pub struct AppContext {
    pub session: SessionService,
    pub wallet: Arc<dyn WalletConnection>,
    pub verifier: VerificationService,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
    pub login: Arc<LoginFlow>,
}

impl AppContext {
    /// Assemble a context from its parts.
    pub fn new(
        backend: Arc<dyn SessionBackend>,
        wallet: Arc<dyn WalletConnection>,
        policy: Arc<dyn DecisionPolicy>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let session = SessionService::new(backend);
        let verifier = VerificationService::new(policy, notifier.clone());
        let login = Arc::new(LoginFlow::new(
            session.clone(),
            wallet.clone(),
            verifier.clone(),
            navigator.clone(),
            notifier.clone(),
        ));

        Self {
            session,
            wallet,
            verifier,
            navigator,
            notifier,
            login,
        }
    }

    /// Headless default wiring: file-backed session under `DATA_DIR`, a
    /// manually driven wallet adapter, the demo verification policy, and
    /// tracing-backed notifications.
    pub fn headless() -> Self {
        Self::new(
            Arc::new(FileBackend::from_env()),
            Arc::new(StaticWallet::new()),
            Arc::new(RandomPolicy::new()),
            Arc::new(RecordingNavigator::new()),
            Arc::new(TracingNotifier),
        )
    }

    /// Hydrate the persisted session and reconcile it with the wallet.
    pub async fn startup(&self) {
        self.session.hydrate().await;
        self.login.sync_wallet().await;
    }

    /// Log out the current user and return to the landing view.
    pub async fn logout(&self) {
        self.login.logout().await;
    }

    /// Submit a registration and record the outcome in the session.
    ///
    /// Universities land in pending status until manually reviewed; students
    /// are verified immediately.
    pub async fn register(
        &self,
        address: &str,
        role: Option<Role>,
        metadata: &serde_json::Value,
    ) -> bool {
        let accepted = self.verifier.register_address(address, role, metadata).await;
        if accepted {
            if let Some(role) = role {
                let update = SessionUpdate {
                    role: Some(role),
                    status: Some(role.registration_status()),
                    ..Default::default()
                };
                if let Err(e) = self.session.update(update).await {
                    tracing::warn!(error = %e, "failed to record registration in session");
                }
            }
        }
        accepted
    }

    /// Cancel pending timers. Call when the embedding shuts down.
    pub fn teardown(&self) {
        self.login.teardown();
    }

    /// Clear all session state without the logout navigation, for tests.
    pub async fn reset(&self) {
        self.login.teardown();
        if let Err(e) = self.session.logout().await {
            tracing::warn!(error = %e, "failed to clear session during reset");
        }
    }
}
