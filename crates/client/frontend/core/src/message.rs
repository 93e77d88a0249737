//! Shared message log and toast primitives for CLI and future UIs.
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Severity level for UI messages produced from session events.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// Snapshot of a single message entry.
#[derive(Clone, Debug)]
pub struct MessageEntry {
    pub text: String,
    /// Combat round the entry belongs to, when known.
    pub timestamp: Option<u64>,
    pub level: MessageLevel,
}

impl MessageEntry {
    pub fn new(text: impl Into<String>, timestamp: Option<u64>, level: MessageLevel) -> Self {
        Self {
            text: text.into(),
            timestamp,
            level,
        }
    }
}

/// Circular buffer of messages displayed to the player.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
        }
    }

    pub fn push(&mut self, entry: MessageEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn push_text(&mut self, message: impl Into<String>) {
        self.push(MessageEntry::new(message, None, MessageLevel::Info));
    }

    /// Newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter().rev().take(limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Short-lived banner for errors and notices.
#[derive(Clone, Debug)]
pub struct Toast {
    pub text: String,
    pub level: MessageLevel,
    pub expires_at: Instant,
}

/// Toasts currently on screen, oldest first.
#[derive(Clone, Debug)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    duration: Duration,
}

impl ToastQueue {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            duration,
        }
    }

    /// Show `text` until `now + duration`. A repeat of the newest toast only
    /// extends its lifetime.
    pub fn push(&mut self, text: impl Into<String>, level: MessageLevel, now: Instant) {
        let text = text.into();
        let expires_at = now + self.duration;

        if let Some(last) = self.toasts.back_mut()
            && last.text == text
            && last.level == level
        {
            last.expires_at = expires_at;
            return;
        }

        self.toasts.push_back(Toast {
            text,
            level,
            expires_at,
        });
    }

    /// Drop expired toasts. Returns `true` when any were removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.expires_at > now);
        self.toasts.len() != before
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.toasts.iter().map(|toast| toast.expires_at).min()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }
}
