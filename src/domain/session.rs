//! Session state definitions.

/// Whether a credential is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No credential; only sign-in screens are reachable.
    #[default]
    Unauthenticated,
    /// Credential present; sensor screens are reachable.
    Authenticated,
}

/// Change to the credential slot, published by the session context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionEvent {
    /// Nothing happened yet.
    #[default]
    Idle,
    /// A credential was stored.
    SignedIn,
    /// The credential was removed on request.
    SignedOut,
    /// The backend rejected the credential and it was removed.
    Expired,
}
