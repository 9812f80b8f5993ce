// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! The session service: single-writer holder of the session record.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::models::{Role, VerificationStatus};
use crate::wallet::WalletStatus;

use super::persist::{SessionBackend, SessionError};

/// The session record.
///
/// Login sets role, status, and address together; logout clears everything
/// together. A wallet sync may hold an address alone before a login
/// completes, which does not count as authenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Role of the authenticated user.
    pub role: Option<Role>,
    /// Verification status.
    pub status: Option<VerificationStatus>,
    /// Display name.
    pub name: Option<String>,
    /// Connected wallet address.
    pub address: Option<String>,
}

impl SessionState {
    /// Whether a user is logged in (role and address both present).
    pub fn is_authenticated(&self) -> bool {
        self.role.is_some() && self.address.is_some()
    }
}

/// Partial update for [`SessionService::update`]. `None` fields are left
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct SessionUpdate {
    pub role: Option<Role>,
    pub status: Option<VerificationStatus>,
    pub name: Option<String>,
    pub address: Option<String>,
}

/// What a wallet sync did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletSync {
    /// Session already matched the wallet.
    Unchanged,
    /// Wallet address adopted into a previously address-less session.
    AddressAdopted,
    /// Stale or disconnected session was cleared.
    LoggedOut,
}

/// Holds the session record and keeps the persisted copy in step.
///
/// Every mutation that leaves an address set writes the record synchronously
/// before returning; logout removes it.
#[derive(Clone)]
pub struct SessionService {
    inner: Arc<RwLock<SessionState>>,
    backend: Arc<dyn SessionBackend>,
}

impl SessionService {
    pub fn new(backend: Arc<dyn SessionBackend>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionState::default())),
            backend,
        }
    }

    /// Load the persisted record at startup.
    ///
    /// A corrupt record is discarded and removed; hydration then behaves
    /// exactly as if no record existed. Never fails the caller.
    pub async fn hydrate(&self) {
        let loaded = match self.backend.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load persisted session");
                return;
            }
        };

        let Some(raw) = loaded else { return };

        match serde_json::from_str::<SessionState>(&raw) {
            Ok(state) => {
                *self.inner.write().await = state;
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding corrupt session record");
                if let Err(e) = self.backend.clear() {
                    tracing::warn!(error = %e, "failed to remove corrupt session record");
                }
                *self.inner.write().await = SessionState::default();
            }
        }
    }

    /// A copy of the current record.
    pub async fn snapshot(&self) -> SessionState {
        self.inner.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_authenticated()
    }

    /// Set all four fields atomically and persist.
    pub async fn login(
        &self,
        address: &str,
        role: Role,
        name: Option<String>,
    ) -> Result<(), SessionError> {
        let mut state = self.inner.write().await;
        *state = SessionState {
            role: Some(role),
            status: Some(VerificationStatus::Verified),
            name,
            address: Some(address.to_string()),
        };
        self.persist(&state)
    }

    /// Clear all fields and remove the persisted record.
    pub async fn logout(&self) -> Result<(), SessionError> {
        let mut state = self.inner.write().await;
        *state = SessionState::default();
        self.backend.clear()
    }

    /// Merge a subset of fields without altering the others. The persisted
    /// copy is rewritten only while an address is set.
    pub async fn update(&self, update: SessionUpdate) -> Result<(), SessionError> {
        let mut state = self.inner.write().await;
        if let Some(role) = update.role {
            state.role = Some(role);
        }
        if let Some(status) = update.status {
            state.status = Some(status);
        }
        if let Some(name) = update.name {
            state.name = Some(name);
        }
        if let Some(address) = update.address {
            state.address = Some(address);
        }

        if state.address.is_some() {
            self.persist(&state)?;
        }
        Ok(())
    }

    /// Reconcile the session with the wallet adapter.
    ///
    /// A different connected address than the stored one is stale-session
    /// protection: the old session is logged out before any new login can
    /// proceed. Disconnection with a stored address also logs out.
    pub async fn sync_wallet(&self, status: &WalletStatus) -> Result<WalletSync, SessionError> {
        let mut state = self.inner.write().await;

        match status.connected_address() {
            Some(connected) => match state.address.as_deref() {
                Some(stored) if stored != connected => {
                    tracing::info!(stored, connected, "wallet address changed, clearing session");
                    *state = SessionState::default();
                    self.backend.clear()?;
                    Ok(WalletSync::LoggedOut)
                }
                Some(_) => Ok(WalletSync::Unchanged),
                None => {
                    state.address = Some(connected.to_string());
                    self.persist(&state)?;
                    Ok(WalletSync::AddressAdopted)
                }
            },
            None => {
                if state.address.is_some() {
                    tracing::info!("wallet disconnected, clearing session");
                    *state = SessionState::default();
                    self.backend.clear()?;
                    Ok(WalletSync::LoggedOut)
                } else {
                    Ok(WalletSync::Unchanged)
                }
            }
        }
    }

    fn persist(&self, state: &SessionState) -> Result<(), SessionError> {
        if state.address.is_some() {
            let raw = serde_json::to_string(state)?;
            self.backend.save(&raw)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::persist::MemoryBackend;

    fn service_with(backend: Arc<MemoryBackend>) -> SessionService {
        SessionService::new(backend)
    }

    #[tokio::test]
    async fn hydrate_restores_persisted_record() {
        let backend = Arc::new(MemoryBackend::with_record(
            r#"{"role":"student","status":"verified","name":"Alex","address":"0xabc"}"#,
        ));
        let session = service_with(backend);
        session.hydrate().await;

        let state = session.snapshot().await;
        assert_eq!(state.role, Some(Role::Student));
        assert_eq!(state.status, Some(VerificationStatus::Verified));
        assert_eq!(state.name.as_deref(), Some("Alex"));
        assert_eq!(state.address.as_deref(), Some("0xabc"));
        assert!(state.is_authenticated());
    }

    #[tokio::test]
    async fn hydrate_discards_and_removes_corrupt_record() {
        let backend = Arc::new(MemoryBackend::with_record("{not json"));
        let session = service_with(backend.clone());
        session.hydrate().await;

        // Same initial state as no record at all, and the record is gone.
        assert_eq!(session.snapshot().await, SessionState::default());
        assert!(backend.raw().is_none());
    }

    #[tokio::test]
    async fn login_sets_all_fields_and_persists() {
        let backend = Arc::new(MemoryBackend::new());
        let session = service_with(backend.clone());

        session
            .login("0xabc", Role::University, Some("Demo University".into()))
            .await
            .unwrap();

        let state = session.snapshot().await;
        assert_eq!(state.role, Some(Role::University));
        assert_eq!(state.status, Some(VerificationStatus::Verified));
        assert_eq!(state.address.as_deref(), Some("0xabc"));

        let raw = backend.raw().expect("record persisted");
        let persisted: SessionState = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, state);
    }

    #[tokio::test]
    async fn logout_clears_fields_and_removes_record() {
        let backend = Arc::new(MemoryBackend::new());
        let session = service_with(backend.clone());

        session.login("0xabc", Role::Student, None).await.unwrap();
        session.logout().await.unwrap();

        assert_eq!(session.snapshot().await, SessionState::default());
        assert!(backend.raw().is_none());
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn update_merges_without_touching_other_fields() {
        let backend = Arc::new(MemoryBackend::new());
        let session = service_with(backend.clone());
        session.login("0xabc", Role::Student, None).await.unwrap();

        session
            .update(SessionUpdate {
                name: Some("Alex".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        let state = session.snapshot().await;
        assert_eq!(state.name.as_deref(), Some("Alex"));
        assert_eq!(state.role, Some(Role::Student));
        assert_eq!(state.address.as_deref(), Some("0xabc"));

        // Persisted copy follows the mutation.
        let raw = backend.raw().unwrap();
        assert!(raw.contains("Alex"));
    }

    #[tokio::test]
    async fn update_without_address_is_not_persisted() {
        let backend = Arc::new(MemoryBackend::new());
        let session = service_with(backend.clone());

        session
            .update(SessionUpdate {
                name: Some("Early".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(backend.raw().is_none());
    }

    #[tokio::test]
    async fn sync_adopts_address_on_first_connect() {
        let backend = Arc::new(MemoryBackend::new());
        let session = service_with(backend.clone());

        let status = WalletStatus {
            address: Some("0xabc".into()),
            is_connected: true,
        };
        assert_eq!(
            session.sync_wallet(&status).await.unwrap(),
            WalletSync::AddressAdopted
        );
        assert_eq!(session.snapshot().await.address.as_deref(), Some("0xabc"));
        assert!(backend.raw().is_some());
    }

    #[tokio::test]
    async fn sync_forces_logout_on_address_change() {
        let backend = Arc::new(MemoryBackend::new());
        let session = service_with(backend.clone());
        session.login("0xbbb", Role::Student, None).await.unwrap();

        let status = WalletStatus {
            address: Some("0xaaa".into()),
            is_connected: true,
        };
        assert_eq!(
            session.sync_wallet(&status).await.unwrap(),
            WalletSync::LoggedOut
        );

        // Old session fully cleared before any new login may proceed.
        assert_eq!(session.snapshot().await, SessionState::default());
        assert!(backend.raw().is_none());
    }

    #[tokio::test]
    async fn sync_logs_out_on_disconnect() {
        let backend = Arc::new(MemoryBackend::new());
        let session = service_with(backend);
        session.login("0xabc", Role::Student, None).await.unwrap();

        assert_eq!(
            session.sync_wallet(&WalletStatus::default()).await.unwrap(),
            WalletSync::LoggedOut
        );

        let state = session.snapshot().await;
        assert_eq!(state.role, None);
        assert_eq!(state.address, None);
    }

    #[tokio::test]
    async fn sync_is_noop_when_nothing_connected() {
        let backend = Arc::new(MemoryBackend::new());
        let session = service_with(backend);

        assert_eq!(
            session.sync_wallet(&WalletStatus::default()).await.unwrap(),
            WalletSync::Unchanged
        );
    }
}
