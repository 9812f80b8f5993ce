// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 CertifyChain

//! User-visible transient notifications (the toast seam).
//!
//! Every asynchronous workflow error is caught at the boundary of the
//! triggering user action and converted into one of these; nothing is
//! allowed to escape to a global handler.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A single transient notification shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique id, so a renderer can deduplicate/dismiss.
    pub id: Uuid,
    /// Severity.
    pub level: NotificationLevel,
    /// Human-readable message.
    pub message: String,
    /// When the notification was raised.
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            at: Utc::now(),
        }
    }
}

/// Sink for user-visible notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn success(&self, message: &str) {
        self.notify(Notification::success(message));
    }

    fn error(&self, message: &str) {
        self.notify(Notification::error(message));
    }
}

/// Notifier that forwards notifications to the tracing subscriber.
///
/// Used when the core runs headless; a UI embedding replaces this with its
/// own toast renderer.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                tracing::info!(id = %notification.id, "{}", notification.message);
            }
            NotificationLevel::Error => {
                tracing::warn!(id = %notification.id, "{}", notification.message);
            }
        }
    }
}

/// Notifier that records everything it is given, for tests.
#[derive(Debug, Default)]
pub struct CaptureNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl CaptureNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded notifications, oldest first.
    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().expect("notifier lock poisoned").clone()
    }

    /// Messages of recorded error notifications.
    pub fn errors(&self) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|n| n.level == NotificationLevel::Error)
            .map(|n| n.message)
            .collect()
    }

    /// Messages of recorded success notifications.
    pub fn successes(&self) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|n| n.level == NotificationLevel::Success)
            .map(|n| n.message)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}

impl Notifier for CaptureNotifier {
    fn notify(&self, notification: Notification) {
        self.seen
            .lock()
            .expect("notifier lock poisoned")
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_notifier_records_by_level() {
        let notifier = CaptureNotifier::new();
        notifier.success("Login successful");
        notifier.error("Wallet not connected");

        assert_eq!(notifier.successes(), vec!["Login successful".to_string()]);
        assert_eq!(notifier.errors(), vec!["Wallet not connected".to_string()]);
    }

    #[test]
    fn notifications_get_unique_ids() {
        let a = Notification::success("a");
        let b = Notification::success("b");
        assert_ne!(a.id, b.id);
    }
}
