// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! Async orchestration of the login state machine.
//!
//! The flow feeds wallet and verification events into the machine and
//! performs the resulting effects: session mutations, notifications, and
//! timed redirects. Errors never propagate past a user action; the worst
//! case is an error notification and an unchanged session.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::config::REDIRECT_DELAY;
use crate::models::Role;
use crate::nav::{Navigator, RedirectScheduler, Route};
use crate::notify::Notifier;
use crate::session::{SessionService, WalletSync};
use crate::verify::VerificationService;
use crate::wallet::WalletConnection;

use super::machine::{Effect, LoginEvent, LoginMachine, LoginState};

/// What a login attempt amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// No wallet connected; nothing attempted.
    NotConnected,
    /// Another verification was already in flight; request dropped.
    Ignored,
    /// Verified and logged in.
    LoggedIn(Role),
    /// Address unknown; user sent to registration.
    NotRegistered,
    /// Verification failed; machine back at `Connected`.
    Failed,
}

pub struct LoginFlow {
    machine: Mutex<LoginMachine>,
    session: SessionService,
    wallet: Arc<dyn WalletConnection>,
    verifier: VerificationService,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    redirects: RedirectScheduler,
    redirect_delay: Duration,
}

impl LoginFlow {
    pub fn new(
        session: SessionService,
        wallet: Arc<dyn WalletConnection>,
        verifier: VerificationService,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            machine: Mutex::new(LoginMachine::new()),
            session,
            wallet,
            verifier,
            navigator,
            notifier,
            redirects: RedirectScheduler::new(),
            redirect_delay: REDIRECT_DELAY,
        }
    }

    /// Override the redirect delay (tests use a few milliseconds).
    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    /// Current machine state.
    pub async fn state(&self) -> LoginState {
        self.machine.lock().await.state().clone()
    }

    /// Reconcile session and machine with the wallet adapter.
    ///
    /// Call on startup and whenever the wallet connection changes. A
    /// disconnect (or an address change) clears the session and returns the
    /// user to the landing view.
    pub async fn sync_wallet(&self) {
        let status = self.wallet.status();

        let sync = match self.session.sync_wallet(&status).await {
            Ok(sync) => sync,
            Err(e) => {
                tracing::warn!(error = %e, "session/wallet sync failed");
                WalletSync::Unchanged
            }
        };

        {
            let mut machine = self.machine.lock().await;
            match status.connected_address() {
                Some(address) => {
                    machine.handle(LoginEvent::WalletConnected(address.to_string()));
                }
                None => {
                    machine.handle(LoginEvent::WalletDisconnected);
                }
            }
        }

        if sync == WalletSync::LoggedOut {
            self.redirects.cancel_all();
            self.notifier.success("Logged out successfully");
            self.navigator.navigate(Route::Landing);
        }
    }

    /// Run one login attempt: verify the connected address and, on success,
    /// commit the session and schedule the dashboard redirect.
    pub async fn login(&self) -> LoginOutcome {
        let status = self.wallet.status();
        let Some(address) = status.connected_address().map(str::to_string) else {
            self.notifier.error("Wallet not connected");
            return LoginOutcome::NotConnected;
        };

        // Stale-session protection runs before any new login is accepted.
        if let Err(e) = self.session.sync_wallet(&status).await {
            tracing::warn!(error = %e, "session/wallet sync failed");
        }

        let effects = {
            let mut machine = self.machine.lock().await;
            // Re-feed the current address unless a check is in flight;
            // `Connected` may still hold a previously connected account.
            if !matches!(machine.state(), LoginState::Checking { .. }) {
                machine.handle(LoginEvent::WalletConnected(address.clone()));
            }
            machine.handle(LoginEvent::LoginRequested)
        };

        let target = effects.iter().find_map(|effect| match effect {
            Effect::StartVerification { address } => Some(address.clone()),
            _ => None,
        });
        let Some(target) = target else {
            self.perform(effects).await;
            return LoginOutcome::Ignored;
        };

        // One verification in flight per session; fire-and-forget from the
        // machine's perspective, awaited here.
        let verification = self.verifier.try_check_address_role(&target).await;

        // The outcome is read in the same lock scope as the transition, so a
        // wallet event racing the effect processing cannot misreport it.
        let (follow_up, outcome) = {
            let mut machine = self.machine.lock().await;
            let follow_up = match verification {
                Ok(result) => machine.handle(LoginEvent::VerificationCompleted(result)),
                Err(e) => {
                    tracing::warn!(address = %target, error = %e, "address verification failed");
                    machine.handle(LoginEvent::VerificationFailed(
                        "Failed to verify wallet address".to_string(),
                    ))
                }
            };
            let outcome = match machine.state() {
                LoginState::Success { role, .. } => LoginOutcome::LoggedIn(*role),
                LoginState::NotRegistered { .. } => LoginOutcome::NotRegistered,
                _ => LoginOutcome::Failed,
            };
            (follow_up, outcome)
        };
        self.perform(follow_up).await;
        outcome
    }

    /// Explicit logout: clear the session, cancel pending redirects, and
    /// return to the landing view.
    pub async fn logout(&self) {
        if let Err(e) = self.session.logout().await {
            tracing::warn!(error = %e, "failed to clear persisted session");
        }
        self.redirects.cancel_all();

        {
            let mut machine = self.machine.lock().await;
            let state = match self.wallet.status().connected_address() {
                Some(address) => LoginState::Connected {
                    address: address.to_string(),
                },
                None => LoginState::Idle,
            };
            machine.reset_to(state);
        }

        self.notifier.success("Logged out successfully");
        self.navigator.navigate(Route::Landing);
    }

    /// Cancel pending redirect timers. In-flight verification calls are
    /// fire-and-forget and keep running.
    pub fn teardown(&self) {
        self.redirects.cancel_all();
    }

    async fn perform(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CompleteLogin { address, role } => {
                    match self.session.login(&address, role, None).await {
                        Ok(()) => self.notifier.success("Login successful"),
                        Err(e) => {
                            tracing::error!(error = %e, "failed to persist login");
                            self.notifier.error("Login failed. Please try again.");
                        }
                    }
                }
                Effect::ScheduleRedirect { route } => {
                    self.redirects
                        .schedule(self.navigator.clone(), route, self.redirect_delay);
                }
                Effect::NotifyError { message } => self.notifier.error(&message),
                Effect::ClearSession => {
                    if let Err(e) = self.session.logout().await {
                        tracing::warn!(error = %e, "failed to clear persisted session");
                    }
                }
                // Verification is driven by `login`, never from here.
                Effect::StartVerification { .. } => {}
            }
        }
    }
}
