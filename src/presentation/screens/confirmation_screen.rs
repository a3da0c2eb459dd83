//! Post-registration confirmation.

use super::{Painter, ScreenOutput};

/// Shown after registering when the backend wants the email confirmed first.
pub struct ConfirmationScreen;

impl ConfirmationScreen {
    /// Confirmation text with next steps.
    #[must_use]
    pub fn render(painter: &Painter) -> ScreenOutput {
        ScreenOutput::lines(vec![
            painter.heading("Registration successful! Please check your email."),
            "Follow the link, then run `airsense verify-email --token <TOKEN>`.".to_string(),
            painter.dim("Then sign in: airsense login --email <EMAIL> --password <PASSWORD>"),
        ])
    }
}
