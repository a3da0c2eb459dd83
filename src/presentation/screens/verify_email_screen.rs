//! Email verification screen.

use std::sync::Arc;

use super::{ScreenOutput, Transition, report};
use crate::application::services::ScreenLifetime;
use crate::application::use_cases::VerifyEmailUseCase;
use crate::domain::errors::ApiError;
use crate::domain::ports::AlertPort;
use crate::presentation::navigation::Route;

/// Confirms an email address from a verification link token.
pub struct VerifyEmailScreen {
    verify: VerifyEmailUseCase,
    alerts: Arc<dyn AlertPort>,
    lifetime: ScreenLifetime,
}

impl VerifyEmailScreen {
    /// Creates the screen with a fresh lifetime.
    #[must_use]
    pub fn new(verify: VerifyEmailUseCase, alerts: Arc<dyn AlertPort>) -> Self {
        Self {
            verify,
            alerts,
            lifetime: ScreenLifetime::new(),
        }
    }

    /// Verifies `token`, opening login on success.
    pub async fn verify(&self, token: Option<&str>) -> ScreenOutput {
        let lines = vec!["Verifying your email...".to_string()];

        match self.lifetime.scope().run(self.verify.execute(token)).await {
            Ok(()) => {
                self.alerts
                    .alert("Email verified", "Your email has been successfully verified.");
                ScreenOutput::lines(lines).then(Transition::Open(Route::Login))
            }
            Err(ApiError::MissingVerificationToken) => {
                self.alerts
                    .alert("No token found", "No verification token found in the URL.");
                ScreenOutput::lines(lines)
            }
            Err(e) => {
                report(
                    self.alerts.as_ref(),
                    "Verification failed",
                    &e,
                    "Invalid or expired token.",
                );
                ScreenOutput::lines(lines)
            }
        }
    }
}
