//! Authentication DTOs.

/// Login form data as entered by the user.
#[derive(Clone)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Device push token to register after signing in.
    pub push_token: Option<String>,
}

impl LoginRequest {
    /// Creates new login request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            push_token: None,
        }
    }

    /// Registers a push token after a successful login.
    #[must_use]
    pub fn with_push_token(mut self, push_token: Option<String>) -> Self {
        self.push_token = push_token.filter(|t| !t.trim().is_empty());
        self
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .field("push_token", &self.push_token.is_some())
            .finish()
    }
}

/// Login response data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginResponse {
    /// Whether a push token was registered with the backend.
    pub push_token_registered: bool,
}

/// Registration form data as entered by the user.
#[derive(Clone)]
pub struct RegisterRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Optional display name.
    pub username: Option<String>,
}

impl RegisterRequest {
    /// Creates new registration request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            username: None,
        }
    }

    /// Sets display name.
    #[must_use]
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .field("username", &self.username)
            .finish()
    }
}

/// What happened after a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The backend issued a credential; the user is signed in.
    SignedIn,
    /// The account must be confirmed by email first.
    ConfirmationRequired,
}
