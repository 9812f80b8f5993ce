// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! Navigational surface and redirect scheduling.
//!
//! The core never renders views; it asks a [`Navigator`] (the router seam)
//! to move between routes. Timed redirects run on cancellable timers so a
//! teardown clears pending navigation without touching in-flight calls.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use url::form_urlencoded;

/// A route in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Public landing view.
    Landing,
    /// Role selection before login/sign-up.
    ChooseRole,
    /// Wallet login.
    Login,
    /// Registration form.
    SignUp,
    /// Shown when a connected address is not registered; carries the address
    /// so the form can pre-fill it.
    CheckAddress { address: Option<String> },
    /// Student onboarding.
    OnboardingStudent,
    /// University onboarding.
    OnboardingUniversity,
    /// Role-specific dashboard.
    Dashboard,
    /// Certificate issuance form.
    NewCertificate,
    /// Detail view for one certificate.
    CertificateDetail { token_id: u64 },
    /// Certificate file upload.
    Upload,
}

impl Route {
    /// Render the route as a path (with query string where applicable).
    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::ChooseRole => "/auth/choose-type".to_string(),
            Route::Login => "/auth/login".to_string(),
            Route::SignUp => "/auth/sign-up".to_string(),
            Route::CheckAddress { address } => match address {
                Some(address) => {
                    let query: String = form_urlencoded::Serializer::new(String::new())
                        .append_pair("address", address)
                        .finish();
                    format!("/auth/check-address?{query}")
                }
                None => "/auth/check-address".to_string(),
            },
            Route::OnboardingStudent => "/onboarding/student".to_string(),
            Route::OnboardingUniversity => "/onboarding/university".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::NewCertificate => "/dashboard/certificate/new".to_string(),
            Route::CertificateDetail { token_id } => {
                format!("/dashboard/certificate/{token_id}")
            }
            Route::Upload => "/upload".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// The router seam. A UI embedding supplies the real implementation.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that records history, for tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full navigation history, oldest first.
    pub fn history(&self) -> Vec<Route> {
        self.history.lock().expect("navigator lock poisoned").clone()
    }

    /// Most recent navigation target, if any.
    pub fn current(&self) -> Option<Route> {
        self.history().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(route = %route, "navigating");
        self.history
            .lock()
            .expect("navigator lock poisoned")
            .push(route);
    }
}

/// Schedules delayed navigation on cancellable timers.
///
/// `cancel_all` clears every pending redirect; it never cancels in-flight
/// network calls, which are fire-and-forget.
pub struct RedirectScheduler {
    token: Mutex<CancellationToken>,
}

impl RedirectScheduler {
    pub fn new() -> Self {
        Self {
            token: Mutex::new(CancellationToken::new()),
        }
    }

    /// Navigate to `route` after `delay`, unless cancelled first.
    pub fn schedule(&self, navigator: Arc<dyn Navigator>, route: Route, delay: Duration) {
        let token = self
            .token
            .lock()
            .expect("scheduler lock poisoned")
            .child_token();

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(route = %route, "redirect cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    navigator.navigate(route);
                }
            }
        });
    }

    /// Cancel every pending redirect (component teardown).
    pub fn cancel_all(&self) {
        let mut guard = self.token.lock().expect("scheduler lock poisoned");
        guard.cancel();
        *guard = CancellationToken::new();
    }
}

impl Default for RedirectScheduler {
    fn default() -> Self {
        Self::new()
    }
}
