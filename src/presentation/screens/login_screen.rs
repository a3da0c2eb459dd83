//! Login screen.

use std::sync::Arc;

use tracing::info;

use super::{Painter, ScreenOutput, Transition, report};
use crate::application::dto::LoginRequest;
use crate::application::services::{CancellationScope, ScreenLifetime};
use crate::application::use_cases::LoginUseCase;
use crate::domain::ports::AlertPort;

const FAILURE_TITLE: &str = "Login failed";
const FAILURE_FALLBACK: &str = "Invalid credentials";

/// Sign-in form.
pub struct LoginScreen {
    login: LoginUseCase,
    alerts: Arc<dyn AlertPort>,
    lifetime: ScreenLifetime,
}

impl LoginScreen {
    /// Creates the screen with a fresh lifetime.
    #[must_use]
    pub fn new(login: LoginUseCase, alerts: Arc<dyn AlertPort>) -> Self {
        Self {
            login,
            alerts,
            lifetime: ScreenLifetime::new(),
        }
    }
    /// Scope of the screen's in-flight requests.

    #[must_use]
    pub fn scope(&self) -> CancellationScope {
        self.lifetime.scope()
    }

    /// Shown when the login screen is opened without credentials.
    #[must_use]
    pub fn prompt(painter: &Painter) -> ScreenOutput {
        ScreenOutput::lines(vec![
            painter.heading("Not signed in."),
            "Sign in:  airsense login --email <EMAIL> --password <PASSWORD>".to_string(),
            "Register: airsense register --email <EMAIL> --password <PASSWORD>".to_string(),
        ])
    }

    /// Submits the form. On success the session holds the new credential.
    pub async fn submit(&self, request: LoginRequest) -> ScreenOutput {
        let wants_push = request.push_token.is_some();

        match self.scope().run(self.login.execute(request)).await {
            Ok(response) => {
                info!("Login screen completed");
                let mut lines = vec!["Signed in.".to_string()];
                if wants_push && !response.push_token_registered {
                    lines.push("Push notifications could not be enabled.".to_string());
                }
                ScreenOutput::lines(lines).then(Transition::SignedIn)
            }
            Err(e) => {
                report(self.alerts.as_ref(), FAILURE_TITLE, &e, FAILURE_FALLBACK);
                ScreenOutput::default()
            }
        }
    }
}
