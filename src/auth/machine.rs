// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! The login state machine.
//!
//! Pure event-in/effects-out transitions, so every path is testable without
//! timers or I/O. The async orchestration lives in [`super::flow`].

use crate::models::{Role, VerificationResult};
use crate::nav::Route;

/// Login lifecycle states.
///
/// `Success` and `NotRegistered` are terminal for a given attempt; they
/// never re-enter `Checking`. A fresh `WalletConnected` event restarts the
/// machine from `Connected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginState {
    /// No wallet present.
    Idle,
    /// Wallet present, not verified.
    Connected { address: String },
    /// Verification in flight. At most one per session.
    Checking { address: String },
    /// Verified and logged in; redirect to the dashboard pending.
    Success { address: String, role: Role },
    /// Address unknown to the backend; redirect to registration pending.
    NotRegistered { address: String },
}

/// Events fed into the machine.
#[derive(Debug, Clone)]
pub enum LoginEvent {
    WalletConnected(String),
    WalletDisconnected,
    LoginRequested,
    VerificationCompleted(VerificationResult),
    VerificationFailed(String),
}

/// Side effects the orchestrator must perform after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Call the verification service for this address.
    StartVerification { address: String },
    /// Commit the session (login) for this address and role.
    CompleteLogin { address: String, role: Role },
    /// Schedule a timed redirect.
    ScheduleRedirect { route: Route },
    /// Clear the session (wallet gone).
    ClearSession,
    /// Show an error notification.
    NotifyError { message: String },
}

/// The machine itself: current state plus the transition function.
#[derive(Debug)]
pub struct LoginMachine {
    state: LoginState,
}

impl LoginMachine {
    pub fn new() -> Self {
        Self {
            state: LoginState::Idle,
        }
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    /// Force a state, used by the flow when reconciling with the wallet
    /// adapter outside the event stream (e.g. after an explicit logout).
    pub(crate) fn reset_to(&mut self, state: LoginState) {
        self.state = state;
    }

    /// Apply one event, returning the effects to perform.
    pub fn handle(&mut self, event: LoginEvent) -> Vec<Effect> {
        match event {
            LoginEvent::WalletConnected(address) => {
                // Any state: a (re)connected wallet restarts from Connected.
                self.state = LoginState::Connected { address };
                Vec::new()
            }

            LoginEvent::WalletDisconnected => {
                let was_idle = self.state == LoginState::Idle;
                self.state = LoginState::Idle;
                if was_idle {
                    Vec::new()
                } else {
                    vec![Effect::ClearSession]
                }
            }

            LoginEvent::LoginRequested => match &self.state {
                LoginState::Connected { address } => {
                    let address = address.clone();
                    self.state = LoginState::Checking {
                        address: address.clone(),
                    };
                    vec![Effect::StartVerification { address }]
                }
                LoginState::Checking { .. } => {
                    // One verification in flight per session; duplicates are
                    // ignored rather than queued.
                    tracing::debug!("login requested while checking, ignored");
                    Vec::new()
                }
                LoginState::Idle => vec![Effect::NotifyError {
                    message: "Wallet not connected".to_string(),
                }],
                LoginState::Success { .. } | LoginState::NotRegistered { .. } => Vec::new(),
            },

            LoginEvent::VerificationCompleted(result) => match &self.state {
                LoginState::Checking { address } => {
                    let address = address.clone();
                    match (result.is_registered, result.role) {
                        (true, Some(role)) => {
                            self.state = LoginState::Success {
                                address: address.clone(),
                                role,
                            };
                            vec![
                                Effect::CompleteLogin { address, role },
                                Effect::ScheduleRedirect {
                                    route: Route::Dashboard,
                                },
                            ]
                        }
                        _ => {
                            self.state = LoginState::NotRegistered {
                                address: address.clone(),
                            };
                            vec![Effect::ScheduleRedirect {
                                route: Route::CheckAddress {
                                    address: Some(address),
                                },
                            }]
                        }
                    }
                }
                // Stale result (wallet disconnected or reset mid-flight).
                _ => Vec::new(),
            },

            LoginEvent::VerificationFailed(message) => match &self.state {
                LoginState::Checking { address } => {
                    self.state = LoginState::Connected {
                        address: address.clone(),
                    };
                    vec![Effect::NotifyError { message }]
                }
                _ => Vec::new(),
            },
        }
    }
}

impl Default for LoginMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VerificationResult;

    fn registered(role: Role) -> VerificationResult {
        VerificationResult {
            is_registered: true,
            role: Some(role),
        }
    }

    #[test]
    fn connect_then_login_starts_verification() {
        let mut machine = LoginMachine::new();
        assert_eq!(machine.state(), &LoginState::Idle);

        machine.handle(LoginEvent::WalletConnected("0xabc".into()));
        assert_eq!(
            machine.state(),
            &LoginState::Connected {
                address: "0xabc".into()
            }
        );

        let effects = machine.handle(LoginEvent::LoginRequested);
        assert_eq!(
            effects,
            vec![Effect::StartVerification {
                address: "0xabc".into()
            }]
        );
        assert_eq!(
            machine.state(),
            &LoginState::Checking {
                address: "0xabc".into()
            }
        );
    }

    #[test]
    fn login_without_wallet_notifies() {
        let mut machine = LoginMachine::new();
        let effects = machine.handle(LoginEvent::LoginRequested);
        assert_eq!(
            effects,
            vec![Effect::NotifyError {
                message: "Wallet not connected".into()
            }]
        );
        assert_eq!(machine.state(), &LoginState::Idle);
    }

    #[test]
    fn duplicate_login_while_checking_is_ignored() {
        let mut machine = LoginMachine::new();
        machine.handle(LoginEvent::WalletConnected("0xabc".into()));
        machine.handle(LoginEvent::LoginRequested);

        let effects = machine.handle(LoginEvent::LoginRequested);
        assert!(effects.is_empty());
        assert_eq!(
            machine.state(),
            &LoginState::Checking {
                address: "0xabc".into()
            }
        );
    }

    #[test]
    fn registered_verification_completes_login_and_redirects() {
        let mut machine = LoginMachine::new();
        machine.handle(LoginEvent::WalletConnected("0xabc".into()));
        machine.handle(LoginEvent::LoginRequested);

        let effects = machine.handle(LoginEvent::VerificationCompleted(registered(
            Role::Student,
        )));
        assert_eq!(
            effects,
            vec![
                Effect::CompleteLogin {
                    address: "0xabc".into(),
                    role: Role::Student
                },
                Effect::ScheduleRedirect {
                    route: Route::Dashboard
                },
            ]
        );
        assert_eq!(
            machine.state(),
            &LoginState::Success {
                address: "0xabc".into(),
                role: Role::Student
            }
        );
    }

    #[test]
    fn unregistered_verification_redirects_to_check_address() {
        let mut machine = LoginMachine::new();
        machine.handle(LoginEvent::WalletConnected("0xabc".into()));
        machine.handle(LoginEvent::LoginRequested);

        let effects = machine.handle(LoginEvent::VerificationCompleted(
            VerificationResult::unregistered(),
        ));
        assert_eq!(
            effects,
            vec![Effect::ScheduleRedirect {
                route: Route::CheckAddress {
                    address: Some("0xabc".into())
                }
            }]
        );
        assert_eq!(
            machine.state(),
            &LoginState::NotRegistered {
                address: "0xabc".into()
            }
        );
    }

    #[test]
    fn registered_without_role_counts_as_unregistered() {
        let mut machine = LoginMachine::new();
        machine.handle(LoginEvent::WalletConnected("0xabc".into()));
        machine.handle(LoginEvent::LoginRequested);

        machine.handle(LoginEvent::VerificationCompleted(VerificationResult {
            is_registered: true,
            role: None,
        }));
        assert!(matches!(
            machine.state(),
            LoginState::NotRegistered { .. }
        ));
    }

    #[test]
    fn verification_failure_returns_to_connected() {
        let mut machine = LoginMachine::new();
        machine.handle(LoginEvent::WalletConnected("0xabc".into()));
        machine.handle(LoginEvent::LoginRequested);

        let effects = machine.handle(LoginEvent::VerificationFailed("boom".into()));
        assert_eq!(
            effects,
            vec![Effect::NotifyError {
                message: "boom".into()
            }]
        );
        assert_eq!(
            machine.state(),
            &LoginState::Connected {
                address: "0xabc".into()
            }
        );
    }

    #[test]
    fn disconnect_from_any_state_clears_session() {
        for setup in [
            Vec::new(),
            vec![LoginEvent::WalletConnected("0xabc".into())],
            vec![
                LoginEvent::WalletConnected("0xabc".into()),
                LoginEvent::LoginRequested,
            ],
            vec![
                LoginEvent::WalletConnected("0xabc".into()),
                LoginEvent::LoginRequested,
                LoginEvent::VerificationCompleted(VerificationResult {
                    is_registered: true,
                    role: Some(Role::University),
                }),
            ],
        ] {
            let mut machine = LoginMachine::new();
            let started_idle = setup.is_empty();
            for event in setup {
                machine.handle(event);
            }

            let effects = machine.handle(LoginEvent::WalletDisconnected);
            assert_eq!(machine.state(), &LoginState::Idle);
            if started_idle {
                assert!(effects.is_empty());
            } else {
                assert_eq!(effects, vec![Effect::ClearSession]);
            }
        }
    }

    #[test]
    fn terminal_states_ignore_login_but_restart_on_reconnect() {
        let mut machine = LoginMachine::new();
        machine.handle(LoginEvent::WalletConnected("0xabc".into()));
        machine.handle(LoginEvent::LoginRequested);
        machine.handle(LoginEvent::VerificationCompleted(registered(
            Role::University,
        )));

        assert!(machine.handle(LoginEvent::LoginRequested).is_empty());
        assert!(matches!(machine.state(), LoginState::Success { .. }));

        machine.handle(LoginEvent::WalletConnected("0xabc".into()));
        assert_eq!(
            machine.state(),
            &LoginState::Connected {
                address: "0xabc".into()
            }
        );
    }

    #[test]
    fn stale_verification_result_is_dropped() {
        let mut machine = LoginMachine::new();
        machine.handle(LoginEvent::WalletConnected("0xabc".into()));
        machine.handle(LoginEvent::LoginRequested);
        machine.handle(LoginEvent::WalletDisconnected);

        // Result arrives after the wallet went away.
        let effects = machine.handle(LoginEvent::VerificationCompleted(registered(
            Role::Student,
        )));
        assert!(effects.is_empty());
        assert_eq!(machine.state(), &LoginState::Idle);
    }
}
