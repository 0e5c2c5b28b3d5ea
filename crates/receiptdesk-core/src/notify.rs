//! Transient on-screen notifications
//!
//! Each notification carries its own expiry; `tick` drops the expired ones.
//! Nothing is cancelled when a newer notification arrives.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::error::{CoreError, ErrorSeverity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl From<ErrorSeverity> for NotificationKind {
    fn from(severity: ErrorSeverity) -> Self {
        match severity {
            ErrorSeverity::Debug | ErrorSeverity::Info => NotificationKind::Info,
            ErrorSeverity::Warning => NotificationKind::Warning,
            ErrorSeverity::Error | ErrorSeverity::Critical => NotificationKind::Error,
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Error => write!(f, "error"),
            NotificationKind::Warning => write!(f, "warning"),
            NotificationKind::Info => write!(f, "info"),
        }
    }
}

pub type NotificationId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    active: Vec<Notification>,
    duration: Duration,
    next_id: NotificationId,
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            active: Vec::new(),
            duration,
            next_id: 1,
        }
    }

    pub fn show(&mut self, kind: NotificationKind, message: impl Into<String>) -> NotificationId {
        self.show_at(kind, message, Instant::now())
    }

    /// Same as `show` with an explicit clock reading
    pub fn show_at(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: Instant,
    ) -> NotificationId {
        let message = message.into();
        match kind {
            NotificationKind::Error => log::error!(target: "receiptdesk::notify", "{}", message),
            NotificationKind::Warning => log::warn!(target: "receiptdesk::notify", "{}", message),
            _ => log::info!(target: "receiptdesk::notify", "{}", message),
        }

        let id = self.next_id;
        self.next_id += 1;
        self.active.push(Notification {
            id,
            kind,
            message,
            expires_at: now + self.duration,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> NotificationId {
        self.show(NotificationKind::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> NotificationId {
        self.show(NotificationKind::Error, message)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> NotificationId {
        self.show(NotificationKind::Warning, message)
    }

    pub fn info(&mut self, message: impl Into<String>) -> NotificationId {
        self.show(NotificationKind::Info, message)
    }

    /// Report a failed operation with the kind its severity calls for
    pub fn report(&mut self, error: &CoreError) -> NotificationId {
        self.show(error.severity().into(), error.to_string())
    }

    /// Drop every notification whose time is up
    pub fn tick(&mut self, now: Instant) {
        self.active.retain(|n| n.expires_at > now);
    }

    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.active.len();
        self.active.retain(|n| n.id != id);
        self.active.len() != before
    }

    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    /// Remove and return everything currently shown
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.active)
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::from_millis(5000))
    }
}
