//! Backend notification entity and the local read-state view.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

/// A notification delivered to the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Notification id.
    pub id: String,
    /// Message text.
    pub message: String,
    /// Creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Read flag.
    pub is_read: bool,
}

impl Notification {
    /// Creates an unread notification.
    #[must_use]
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            created_at: None,
            is_read: false,
        }
    }

    /// Sets creation time.
    #[must_use]
    pub fn created_at(mut self, at: Option<DateTime<Utc>>) -> Self {
        self.created_at = at;
        self
    }

    /// Sets read flag.
    #[must_use]
    pub fn read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }
}

/// Notifications as shown on screen, newest first.
///
/// Marking read only changes this view and the set of locally read ids. It is
/// never sent to the backend.
#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    items: Vec<Notification>,
    locally_read: BTreeSet<String>,
}

impl NotificationFeed {
    /// Builds the feed, applying ids already read on this device. Ids that
    /// are no longer in the feed are forgotten.
    #[must_use]
    pub fn new(mut items: Vec<Notification>, mut locally_read: BTreeSet<String>) -> Self {
        locally_read.retain(|id| items.iter().any(|n| n.id == *id));
        for item in &mut items {
            if locally_read.contains(&item.id) {
                item.is_read = true;
            }
        }
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Self {
            items,
            locally_read,
        }
    }

    /// Marks a notification read. Returns `false` for unknown ids.
    pub fn mark_read(&mut self, id: &str) -> bool {
        let Some(item) = self.items.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        item.is_read = true;
        self.locally_read.insert(id.to_string());
        true
    }

    /// Notifications in display order.
    #[must_use]
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Ids in this feed that were read on this device.
    #[must_use]
    pub const fn locally_read(&self) -> &BTreeSet<String> {
        &self.locally_read
    }

    /// Number of unread notifications.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read).count()
    }

    /// Whether the feed has no notifications.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
