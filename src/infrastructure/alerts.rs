//! Terminal alerts.

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::style::{Attribute, Color, Stylize};

use crate::domain::ports::AlertPort;

/// Writes alerts to stderr so stdout only carries screen output.
#[derive(Debug, Default)]
pub struct TerminalAlerts {
    color: bool,
    lock: Mutex<()>,
}

impl TerminalAlerts {
    /// Creates alerts, styled when `color` is set.
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self {
            color,
            lock: Mutex::new(()),
        }
    }

    fn format(&self, title: &str, message: &str) -> String {
        if self.color {
            format!(
                "{} {}",
                format!("{title}:").with(Color::Red).attribute(Attribute::Bold),
                message
            )
        } else {
            format!("{title}: {message}")
        }
    }
}

impl AlertPort for TerminalAlerts {
    fn alert(&self, title: &str, message: &str) {
        tracing::info!(title, message, "Alert shown");

        let line = self.format(title, message);
        let _guard = self.lock.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut stderr = io::stderr().lock();
        if let Err(e) = writeln!(stderr, "{line}") {
            tracing::warn!(error = %e, "Failed to write alert");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_format_without_color() {
        let alerts = TerminalAlerts::new(false);
        assert_eq!(
            alerts.format("Login failed", "Invalid credentials"),
            "Login failed: Invalid credentials"
        );
    }

    #[test]
    fn test_colored_format_keeps_text() {
        let alerts = TerminalAlerts::new(true);
        let line = alerts.format("Error", "An error occurred");
        assert!(line.contains("Error:"));
        assert!(line.ends_with("An error occurred"));
    }
}
