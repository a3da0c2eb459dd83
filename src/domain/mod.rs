//! Domain layer with core entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Session state definitions.
pub mod session;

pub use entities::{AqiLevel, AuthToken, Sensor, SensorId, SensorReading};
pub use errors::{ApiError, SecretError};
pub use ports::{AirQualityPort, AlertPort, TokenStoragePort};
pub use session::{SessionEvent, SessionState};
