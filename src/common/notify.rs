use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Positive,
    Negative,
    Warning,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotifyKind,
    pub message: String,
    pub created: Instant,
    pub timeout: Duration,
}

impl Notification {
    pub fn new(kind: NotifyKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            created: Instant::now(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn positive(message: impl Into<String>) -> Self {
        Self::new(NotifyKind::Positive, message)
    }

    pub fn negative(message: impl Into<String>) -> Self {
        Self::new(NotifyKind::Negative, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotifyKind::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotifyKind::Info, message)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.created) >= self.timeout
    }
}

/// Toasts shown in the status bar, oldest first. Pruned on every tick.
#[derive(Debug, Default)]
pub struct NotifyQueue {
    items: VecDeque<Notification>,
}

impl NotifyQueue {
    pub fn push(&mut self, notification: Notification) {
        match notification.kind {
            NotifyKind::Negative => tracing::warn!(message = %notification.message, "notify"),
            _ => tracing::debug!(message = %notification.message, "notify"),
        }
        self.items.push_back(notification);
    }

    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|n| !n.is_expired(now));
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
