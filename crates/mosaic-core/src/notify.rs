//! User-facing notifications.
//!
//! Engines push notifications into an [`Outbox`] and never look at them again;
//! the host drains the outbox after each call and shows toasts however it
//! likes. Display lifecycle is entirely the host's concern. An outbox that is
//! never drained keeps only the newest [`OUTBOX_CAPACITY`] entries.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Error,
}

/// A single toast-style message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub severity: Severity,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            severity: Severity::Success,
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            severity: Severity::Info,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            severity: Severity::Error,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Most notifications an outbox holds before dropping the oldest.
pub const OUTBOX_CAPACITY: usize = 64;

/// Queue of notifications waiting for the host.
#[derive(Debug, Default)]
pub struct Outbox {
    queue: VecDeque<Notification>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        if self.queue.len() == OUTBOX_CAPACITY {
            if let Some(dropped) = self.queue.pop_front() {
                log::warn!("notification outbox full, dropped {:?}", dropped.title);
            }
        }
        self.queue.push_back(notification);
    }

    /// Remove and return everything queued, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
