//! Main application orchestrator.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{LoginRequest, RegisterRequest};
use crate::application::services::{CancellationScope, SessionContext};
use crate::application::use_cases::{
    LoadNotificationsUseCase, LoginUseCase, RegisterUseCase, SensorReadingsUseCase,
    SubscriptionUseCase, VerifyEmailUseCase,
};
use crate::domain::entities::SensorId;
use crate::domain::errors::ApiError;
use crate::domain::ports::{AirQualityPort, AlertPort};
use crate::domain::session::SessionEvent;
use crate::infrastructure::config::{Command, StateConfig, StorageManager};
use crate::presentation::navigation::{Navigator, Route};
use crate::presentation::screens::{
    ConfirmationScreen, LoginScreen, MapScreen, NotificationsScreen, Painter, RegisterScreen,
    ScreenOutput, Transition, VerifyEmailScreen,
};

/// Everything the app needs, wired by the binary.
pub struct AppContext {
    /// Credential slot shared with the request client.
    pub session: Arc<SessionContext>,
    /// Backend.
    pub api: Arc<dyn AirQualityPort>,
    /// User-facing alerts.
    pub alerts: Arc<dyn AlertPort>,
    /// Where locally read notification ids are kept.
    pub state_storage: StorageManager,
    /// Output formatting.
    pub painter: Painter,
    /// Push token registered after login when none is given on the command line.
    pub push_token: Option<String>,
}

/// Runs CLI commands against the current screen and session.
pub struct App {
    session: Arc<SessionContext>,
    api: Arc<dyn AirQualityPort>,
    alerts: Arc<dyn AlertPort>,
    state_storage: StorageManager,
    painter: Painter,
    push_token: Option<String>,
    navigator: Navigator,
}

impl App {
    /// Builds the app and resolves the start screen.
    pub async fn start(context: AppContext) -> Self {
        let navigator = Navigator::start(context.session.clone()).await;

        Self {
            session: context.session,
            api: context.api,
            alerts: context.alerts,
            state_storage: context.state_storage,
            painter: context.painter,
            push_token: context.push_token,
            navigator,
        }
    }

    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Runs one command and returns the lines to print.
    ///
    /// # Errors
    /// Returns [`ApiError::Cancelled`] if `interrupt` fires first; the active
    /// screen is dropped, which abandons its requests.
    pub async fn run(
        &mut self,
        command: Option<Command>,
        interrupt: &CancellationScope,
    ) -> Result<Vec<String>, ApiError> {
        tokio::select! {
            biased;
            () = interrupt.cancelled() => {
                warn!("Interrupted, abandoning active screen");
                Err(ApiError::Cancelled)
            }
            lines = self.dispatch(command) => Ok(lines),
        }
    }

    async fn dispatch(&mut self, command: Option<Command>) -> Vec<String> {
        self.notice_expiry();

        let output = match command {
            None => self.open(self.navigator.route()).await,
            Some(Command::Login {
                email,
                password,
                push_token,
            }) => {
                self.navigator.navigate(Route::Login);
                let request = LoginRequest::new(email, password)
                    .with_push_token(push_token.or_else(|| self.push_token.clone()));
                self.login_screen().submit(request).await
            }
            Some(Command::Register {
                email,
                password,
                username,
            }) => {
                self.navigator.navigate(Route::Register);
                let request = RegisterRequest::new(email, password).with_username(username);
                RegisterScreen::new(
                    RegisterUseCase::new(self.api.clone(), self.session.clone()),
                    self.alerts.clone(),
                )
                .submit(request)
                .await
            }
            Some(Command::VerifyEmail { token }) => {
                self.navigator.navigate(Route::VerifyEmail);
                VerifyEmailScreen::new(VerifyEmailUseCase::new(self.api.clone()), self.alerts.clone())
                    .verify(token.as_deref())
                    .await
            }
            Some(Command::Sensors) => self.open(Route::Map).await,
            Some(Command::Reading { sensor_id }) => {
                self.on_map(|screen, id| async move { screen.reading(&id).await }, sensor_id)
                    .await
            }
            Some(Command::Subscribe { sensor_id }) => {
                self.on_map(|screen, id| async move { screen.subscribe(&id).await }, sensor_id)
                    .await
            }
            Some(Command::Unsubscribe { sensor_id }) => {
                self.on_map(|screen, id| async move { screen.unsubscribe(&id).await }, sensor_id)
                    .await
            }
            Some(Command::Notifications { mark_read }) => self.notifications(&mark_read).await,
            Some(Command::Logout) => self.logout().await,
        };

        let mut lines = output.lines;
        lines.extend(self.follow(output.transition).await.lines);

        if self.notice_expiry() {
            lines.extend(LoginScreen::prompt(&self.painter).lines);
        }
        lines
    }

    /// Alerts once if the backend rejected the credential since the last check.
    fn notice_expiry(&mut self) -> bool {
        if self.navigator.sync_session() != Some(SessionEvent::Expired) {
            return false;
        }
        self.alerts.alert("Session expired", "Please sign in again.");
        true
    }

    async fn follow(&mut self, transition: Transition) -> ScreenOutput {
        let route = match transition {
            Transition::Stay => return ScreenOutput::default(),
            Transition::SignedIn => self.navigator.on_authenticated(),
            Transition::Registered(outcome) => self.navigator.on_registered(outcome),
            Transition::Open(route) => self.navigator.navigate(route),
        };
        debug!(%route, "Following transition");
        self.open(route).await
    }

    /// Shows a screen that needs no input.
    async fn open(&mut self, route: Route) -> ScreenOutput {
        match self.navigator.navigate(route) {
            Route::Login => LoginScreen::prompt(&self.painter),
            Route::Register => ScreenOutput::lines(vec![
                "Register: airsense register --email <EMAIL> --password <PASSWORD> [--username <NAME>]"
                    .to_string(),
            ]),
            Route::VerifyEmail => ScreenOutput::lines(vec![
                "Verify: airsense verify-email --token <TOKEN>".to_string(),
            ]),
            Route::Confirmation => ConfirmationScreen::render(&self.painter),
            Route::Map => self.map_screen().show(self.navigator.state()).await,
            Route::Notifications => self.notifications(&[]).await,
        }
    }

    async fn on_map<F, Fut>(&mut self, action: F, sensor_id: String) -> ScreenOutput
    where
        F: FnOnce(MapScreen, SensorId) -> Fut,
        Fut: std::future::Future<Output = ScreenOutput>,
    {
        if self.navigator.navigate(Route::Map) != Route::Map {
            return LoginScreen::prompt(&self.painter);
        }
        action(self.map_screen(), SensorId::new(sensor_id)).await
    }

    async fn notifications(&mut self, mark_read: &[String]) -> ScreenOutput {
        if self.navigator.navigate(Route::Notifications) != Route::Notifications {
            return LoginScreen::prompt(&self.painter);
        }

        let mut state = match self.state_storage.load_state() {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "Failed to load local state");
                StateConfig::default()
            }
        };

        let screen = NotificationsScreen::new(
            LoadNotificationsUseCase::new(self.api.clone(), self.session.clone()),
            self.alerts.clone(),
            self.painter.clone(),
        );
        let (output, read) = screen
            .show(state.read_notifications.clone(), mark_read)
            .await;

        if let Some(read) = read.filter(|read| *read != state.read_notifications) {
            state.read_notifications = read;
            if let Err(e) = self.state_storage.save_state(&state) {
                warn!(error = %e, "Failed to save read notifications");
            }
        }
        output
    }

    async fn logout(&mut self) -> ScreenOutput {
        match self.navigator.logout().await {
            Ok(route) => {
                info!("Logged out");
                let mut lines = vec!["Signed out.".to_string()];
                lines.extend(self.open(route).await.lines);
                ScreenOutput::lines(lines)
            }
            Err(e) => {
                self.alerts.alert(
                    "Logout failed",
                    &e.user_message("Could not remove the stored credential"),
                );
                ScreenOutput::default()
            }
        }
    }

    fn login_screen(&self) -> LoginScreen {
        LoginScreen::new(
            LoginUseCase::new(self.api.clone(), self.session.clone()),
            self.alerts.clone(),
        )
    }

    fn map_screen(&self) -> MapScreen {
        MapScreen::new(
            SensorReadingsUseCase::new(self.api.clone()),
            SubscriptionUseCase::new(self.api.clone()),
            self.alerts.clone(),
            self.painter.clone(),
        )
    }
}
