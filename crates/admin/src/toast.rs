//! Toast notification queue.
//!
//! Mutation outcomes surface to the operator through short-lived
//! notifications. The queue lives on the app state and is drained by the
//! shell (CLI today, a UI later); it is never a process global.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

impl ToastLevel {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub level: ToastLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// FIFO queue of pending notifications.
///
/// Interior mutability keeps `push` available behind the shared
/// [`AppState`](crate::state::AppState) handle; the lock is never held
/// across an await.
#[derive(Debug, Default)]
pub struct ToastQueue {
    inner: Mutex<VecDeque<Toast>>,
}

impl ToastQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a notification.
    pub fn push(&self, level: ToastLevel, message: impl Into<String>) {
        let toast = Toast {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            created_at: Utc::now(),
        };
        if let Ok(mut queue) = self.inner.lock() {
            queue.push_back(toast);
        }
    }

    /// Push a success notification.
    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message);
    }

    /// Push an error notification.
    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message);
    }

    /// Take all pending notifications, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Toast> {
        self.inner
            .lock()
            .map(|mut queue| queue.drain(..).collect())
            .unwrap_or_default()
    }

    /// Number of pending notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().map(|queue| queue.len()).unwrap_or(0)
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all pending notifications.
    pub fn clear(&self) {
        if let Ok(mut queue) = self.inner.lock() {
            queue.clear();
        }
    }
}
