//! Session-gated navigation.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::application::dto::RegisterOutcome;
use crate::application::services::SessionContext;
use crate::application::use_cases::ResolveSessionUseCase;
use crate::domain::errors::ApiError;
use crate::domain::session::{SessionEvent, SessionState};

/// Screens the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Sign-in form.
    Login,
    /// Account creation form.
    Register,
    /// Email verification.
    VerifyEmail,
    /// Shown after registering without an immediate sign-in.
    Confirmation,
    /// Sensors with their latest air quality.
    Map,
    /// The user's notifications.
    Notifications,
}

impl Route {
    /// Whether the route needs a signed-in session.
    #[must_use]
    pub const fn requires_session(self) -> bool {
        matches!(self, Self::Map | Self::Notifications)
    }

    /// Screen title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
            Self::VerifyEmail => "Verify Email",
            Self::Confirmation => "Confirmation",
            Self::Map => "Map",
            Self::Notifications => "Notifications",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Tracks the session state and the current route.
///
/// Signed-out sessions can only reach the entry screens. Session events
/// published by [`SessionContext`] are applied on every navigation, so a
/// credential the backend rejected sends the user back to [`Route::Login`].
pub struct Navigator {
    session: Arc<SessionContext>,
    events: watch::Receiver<SessionEvent>,
    state: SessionState,
    route: Route,
}

impl Navigator {
    /// Resolves the start screen from credential presence.
    pub async fn start(session: Arc<SessionContext>) -> Self {
        let mut events = session.subscribe();
        events.mark_unchanged();

        let state = ResolveSessionUseCase::new(session.clone()).execute().await;
        let route = match state {
            SessionState::Authenticated => Route::Map,
            SessionState::Unauthenticated => Route::Login,
        };

        info!(?state, %route, "Navigation started");

        Self {
            session,
            events,
            state,
            route,
        }
    }

    /// Current session state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Route currently shown.
    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    /// Applies session changes published since the last call.
    pub fn sync_session(&mut self) -> Option<SessionEvent> {
        if !self.events.has_changed().unwrap_or(false) {
            return None;
        }

        let event = *self.events.borrow_and_update();
        match event {
            SessionEvent::SignedIn => self.state = SessionState::Authenticated,
            SessionEvent::SignedOut | SessionEvent::Expired => {
                if event == SessionEvent::Expired {
                    warn!("Session expired, returning to login");
                }
                self.state = SessionState::Unauthenticated;
                self.route = Route::Login;
            }
            SessionEvent::Idle => {}
        }
        Some(event)
    }

    /// Moves to `route`, redirecting to [`Route::Login`] when it needs a
    /// session and there is none. Returns the route actually shown.
    pub fn navigate(&mut self, route: Route) -> Route {
        self.sync_session();

        if route.requires_session() && self.state == SessionState::Unauthenticated {
            debug!(%route, "Not signed in, redirecting to login");
            self.route = Route::Login;
        } else {
            self.route = route;
        }
        self.route
    }

    /// Signs in locally after a successful login.
    pub fn on_authenticated(&mut self) -> Route {
        self.sync_session();
        self.state = SessionState::Authenticated;
        self.route = Route::Map;
        self.route
    }

    /// Routes after registration.
    pub fn on_registered(&mut self, outcome: RegisterOutcome) -> Route {
        match outcome {
            RegisterOutcome::SignedIn => self.on_authenticated(),
            RegisterOutcome::ConfirmationRequired => self.navigate(Route::Confirmation),
        }
    }

    /// Deletes the credential, then returns to [`Route::Login`]. The route is
    /// left unchanged if deletion fails.
    ///
    /// # Errors
    /// Returns the storage error.
    pub async fn logout(&mut self) -> Result<Route, ApiError> {
        self.session.clear().await?;

        self.sync_session();
        self.state = SessionState::Unauthenticated;
        self.route = Route::Login;
        info!("Signed out");
        Ok(self.route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AuthToken;
    use crate::domain::ports::TokenStoragePort;
    use crate::domain::ports::mocks::MockTokenStorage;

    async fn navigator(storage: Arc<MockTokenStorage>) -> (Navigator, Arc<SessionContext>) {
        let session = Arc::new(SessionContext::new(storage));
        (Navigator::start(session.clone()).await, session)
    }

    #[tokio::test]
    async fn test_starts_on_map_with_credential() {
        let storage = Arc::new(MockTokenStorage::with_token(AuthToken::new_unchecked("stored")));
        let (nav, _) = navigator(storage).await;

        assert_eq!(nav.state(), SessionState::Authenticated);
        assert_eq!(nav.route(), Route::Map);
    }

    #[tokio::test]
    async fn test_starts_on_login_without_credential() {
        let (nav, _) = navigator(Arc::new(MockTokenStorage::new())).await;

        assert_eq!(nav.state(), SessionState::Unauthenticated);
        assert_eq!(nav.route(), Route::Login);
    }

    #[tokio::test]
    async fn test_storage_failure_starts_signed_out() {
        let storage = Arc::new(MockTokenStorage::with_token(AuthToken::new_unchecked("stored")));
        storage.set_failing(true);
        let (nav, _) = navigator(storage).await;

        assert_eq!(nav.route(), Route::Login);
    }

    #[tokio::test]
    async fn test_guarded_routes_redirect_to_login() {
        let (mut nav, _) = navigator(Arc::new(MockTokenStorage::new())).await;

        assert_eq!(nav.navigate(Route::Map), Route::Login);
        assert_eq!(nav.navigate(Route::Notifications), Route::Login);
        assert_eq!(nav.navigate(Route::Register), Route::Register);
        assert_eq!(nav.navigate(Route::VerifyEmail), Route::VerifyEmail);
    }

    #[tokio::test]
    async fn test_registration_routes() {
        let (mut nav, _) = navigator(Arc::new(MockTokenStorage::new())).await;
        assert_eq!(
            nav.on_registered(RegisterOutcome::ConfirmationRequired),
            Route::Confirmation
        );
        assert_eq!(nav.state(), SessionState::Unauthenticated);

        assert_eq!(nav.on_registered(RegisterOutcome::SignedIn), Route::Map);
        assert_eq!(nav.state(), SessionState::Authenticated);
    }

    #[tokio::test]
    async fn test_logout_deletes_before_leaving() {
        let storage = Arc::new(MockTokenStorage::with_token(AuthToken::new_unchecked("stored")));
        let (mut nav, _) = navigator(storage.clone()).await;

        let route = nav.logout().await.unwrap();

        assert_eq!(route, Route::Login);
        assert!(!storage.has_token().await.unwrap());
        assert_eq!(nav.navigate(Route::Map), Route::Login);
    }

    #[tokio::test]
    async fn test_failed_logout_stays_put() {
        let storage = Arc::new(MockTokenStorage::with_token(AuthToken::new_unchecked("stored")));
        let (mut nav, _) = navigator(storage.clone()).await;
        storage.set_failing(true);

        let result = nav.logout().await;

        assert!(matches!(result, Err(ApiError::Storage(_))));
        assert_eq!(nav.route(), Route::Map);
        assert_eq!(nav.state(), SessionState::Authenticated);
    }

    #[tokio::test]
    async fn test_expired_session_forces_login() {
        let storage = Arc::new(MockTokenStorage::with_token(AuthToken::new_unchecked("stored")));
        let (mut nav, session) = navigator(storage).await;

        session.expire(&AuthToken::new_unchecked("stored")).await;

        assert_eq!(nav.sync_session(), Some(SessionEvent::Expired));
        assert_eq!(nav.route(), Route::Login);
        assert_eq!(nav.navigate(Route::Notifications), Route::Login);
    }

    #[tokio::test]
    async fn test_sign_in_event_unlocks_guarded_routes() {
        let (mut nav, session) = navigator(Arc::new(MockTokenStorage::new())).await;

        session
            .store(&AuthToken::new_unchecked("fresh"))
            .await
            .unwrap();

        assert_eq!(nav.navigate(Route::Map), Route::Map);
    }
}
