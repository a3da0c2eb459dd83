//! Account creation screen.

use std::sync::Arc;

use super::{ScreenOutput, Transition, report};
use crate::application::dto::{RegisterOutcome, RegisterRequest};
use crate::application::services::ScreenLifetime;
use crate::application::use_cases::RegisterUseCase;
use crate::domain::ports::AlertPort;

/// Account creation form.
pub struct RegisterScreen {
    register: RegisterUseCase,
    alerts: Arc<dyn AlertPort>,
    lifetime: ScreenLifetime,
}

impl RegisterScreen {
    /// Creates the screen with a fresh lifetime.
    #[must_use]
    pub fn new(register: RegisterUseCase, alerts: Arc<dyn AlertPort>) -> Self {
        Self {
            register,
            alerts,
            lifetime: ScreenLifetime::new(),
        }
    }

    /// Registers and routes on the outcome.
    pub async fn submit(&self, request: RegisterRequest) -> ScreenOutput {
        match self.lifetime.scope().run(self.register.execute(request)).await {
            Ok(outcome) => {
                let line = match outcome {
                    RegisterOutcome::SignedIn => "Account created and signed in.",
                    RegisterOutcome::ConfirmationRequired => "Account created.",
                };
                ScreenOutput::lines(vec![line.to_string()]).then(Transition::Registered(outcome))
            }
            Err(e) => {
                report(
                    self.alerts.as_ref(),
                    "Registration failed",
                    &e,
                    "Something went wrong",
                );
                ScreenOutput::default()
            }
        }
    }
}
