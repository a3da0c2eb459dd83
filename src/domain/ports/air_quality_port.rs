//! Air-quality backend port definition.

use async_trait::async_trait;

use crate::domain::entities::{AuthToken, Notification, Sensor, SensorId, SensorReading};
use crate::domain::errors::ApiError;

/// Email and password submitted to sign in or register.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Account registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Email and password.
    pub credentials: Credentials,
    /// Optional display name.
    pub username: Option<String>,
}

/// Port for the air-quality backend.
///
/// Calls marked authenticated rely on the credential held by the session
/// context; they are not passed a token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AirQualityPort: Send + Sync {
    /// Signs in and returns the issued credential.
    async fn login(&self, credentials: &Credentials) -> Result<AuthToken, ApiError>;

    /// Creates an account. Returns a credential when the backend signs the
    /// user in immediately.
    async fn register(&self, registration: &Registration) -> Result<Option<AuthToken>, ApiError>;

    /// Confirms an email address with the token from the verification link.
    async fn verify_email(&self, token: &str) -> Result<(), ApiError>;

    /// Lists all sensors.
    async fn list_sensors(&self) -> Result<Vec<Sensor>, ApiError>;

    /// Fetches the latest reading of a sensor.
    async fn latest_reading(&self, sensor_id: &SensorId) -> Result<SensorReading, ApiError>;

    /// Lists sensors the user is subscribed to. Authenticated.
    async fn subscribed_sensors(&self) -> Result<Vec<SensorId>, ApiError>;

    /// Subscribes to a sensor. Authenticated.
    async fn subscribe(&self, sensor_id: &SensorId) -> Result<(), ApiError>;

    /// Unsubscribes from a sensor. Authenticated.
    async fn unsubscribe(&self, sensor_id: &SensorId) -> Result<(), ApiError>;

    /// Lists the user's notifications. Authenticated.
    async fn notifications(&self) -> Result<Vec<Notification>, ApiError>;

    /// Registers a push-notification device token. Authenticated.
    async fn register_push_token(&self, push_token: &str) -> Result<(), ApiError>;
}
