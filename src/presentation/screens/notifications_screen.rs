//! Notification feed screen.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::{Painter, ScreenOutput, report};
use crate::application::services::ScreenLifetime;
use crate::application::use_cases::LoadNotificationsUseCase;
use crate::domain::ports::AlertPort;

/// The user's notifications, newest first.
pub struct NotificationsScreen {
    notifications: LoadNotificationsUseCase,
    alerts: Arc<dyn AlertPort>,
    painter: Painter,
    lifetime: ScreenLifetime,
}

impl NotificationsScreen {
    /// Creates the screen with a fresh lifetime.
    #[must_use]
    pub fn new(
        notifications: LoadNotificationsUseCase,
        alerts: Arc<dyn AlertPort>,
        painter: Painter,
    ) -> Self {
        Self {
            notifications,
            alerts,
            painter,
            lifetime: ScreenLifetime::new(),
        }
    }

    /// Loads the feed and marks `mark_read` ids read on this device.
    ///
    /// Returns the updated set of locally read ids when the feed loaded.
    pub async fn show(
        &self,
        locally_read: BTreeSet<String>,
        mark_read: &[String],
    ) -> (ScreenOutput, Option<BTreeSet<String>>) {
        let mut feed = match self
            .lifetime
            .scope()
            .run(self.notifications.execute(locally_read))
            .await
        {
            Ok(feed) => feed,
            Err(e) => {
                report(
                    self.alerts.as_ref(),
                    "Error",
                    &e,
                    "Failed to fetch notifications",
                );
                return (ScreenOutput::default(), None);
            }
        };

        for id in mark_read {
            if !feed.mark_read(id) {
                self.alerts
                    .alert("Notifications", &format!("No notification with id {id}"));
            }
        }

        if feed.is_empty() {
            self.alerts.alert("Notifications", "No new notifications");
            return (ScreenOutput::default(), Some(feed.locally_read().clone()));
        }

        let mut lines = vec![self.painter.heading(&format!(
            "Notifications ({} unread)",
            feed.unread_count()
        ))];
        lines.extend(feed.items().iter().map(|n| {
            format!("{}  {}", self.painter.notification(n), self.painter.dim(&format!("#{}", n.id)))
        }));

        (ScreenOutput::lines(lines), Some(feed.locally_read().clone()))
    }
}
