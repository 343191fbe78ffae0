//! services/client/src/notifications.rs
//!
//! Session-local acknowledgements of completed submissions. Nothing here is
//! persisted or sent to the store.

use attendance_core::domain::AttendanceStatus;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use uuid::Uuid;

/// How many notifications are kept before the oldest is evicted.
pub const MAX_NOTIFICATIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Time-ordered, so later notifications sort after earlier ones.
    pub id: Uuid,
    pub message: String,
    /// Local wall-clock time, e.g. `9:05:03 AM`.
    pub timestamp: String,
}

impl Notification {
    pub fn for_submission(last_name: &str, status: AttendanceStatus, at: DateTime<Local>) -> Self {
        Self {
            id: Uuid::now_v7(),
            message: format!("{} marked as {}", last_name, status),
            timestamp: at.format("%-I:%M:%S %p").to_string(),
        }
    }
}

/// Newest-first list of at most [`MAX_NOTIFICATIONS`] entries.
#[derive(Debug, Default, Clone)]
pub struct NotificationQueue {
    entries: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `notification` at the front and drops whatever falls past the limit.
    pub fn push(&mut self, notification: Notification) {
        self.entries.push_front(notification);
        self.entries.truncate(MAX_NOTIFICATIONS);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
