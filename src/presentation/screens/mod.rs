//! Screens. Each owns a [`ScreenLifetime`]; dropping the screen abandons its
//! in-flight requests.
//!
//! [`ScreenLifetime`]: crate::application::services::ScreenLifetime

mod confirmation_screen;
mod login_screen;
mod map_screen;
mod notifications_screen;
mod register_screen;
mod render;
mod verify_email_screen;

pub use confirmation_screen::ConfirmationScreen;
pub use login_screen::LoginScreen;
pub use map_screen::MapScreen;
pub use notifications_screen::NotificationsScreen;
pub use register_screen::RegisterScreen;
pub use render::Painter;
pub use verify_email_screen::VerifyEmailScreen;

use tracing::debug;

use crate::application::dto::RegisterOutcome;
use crate::domain::errors::ApiError;
use crate::domain::ports::AlertPort;
use crate::presentation::navigation::Route;

/// What a screen asks the navigator to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    /// Stay on the current screen.
    #[default]
    Stay,
    /// Login succeeded.
    SignedIn,
    /// Registration succeeded.
    Registered(RegisterOutcome),
    /// Open another screen.
    Open(Route),
}

/// Rendered lines plus the requested transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenOutput {
    /// Lines for stdout.
    pub lines: Vec<String>,
    /// Where to go next.
    pub transition: Transition,
}

impl ScreenOutput {
    /// Lines with no transition.
    #[must_use]
    pub fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            transition: Transition::Stay,
        }
    }

    /// Sets the transition.
    #[must_use]
    pub const fn then(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }
}

/// Shows `error` as an alert, using `fallback` when the backend gave no
/// message. Cancelled work is not reported.
fn report(alerts: &dyn AlertPort, title: &str, error: &ApiError, fallback: &str) {
    if matches!(error, ApiError::Cancelled) {
        debug!(title, "Request abandoned, not alerting");
        return;
    }
    alerts.alert(title, &error.user_message(fallback));
}
