//! User-facing alert port.

/// Port for user-facing alerts.
pub trait AlertPort: Send + Sync {
    /// Shows an alert with a title and a message.
    fn alert(&self, title: &str, message: &str);
}
