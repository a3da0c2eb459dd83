//! Ports implemented by infrastructure adapters.

mod air_quality_port;
mod alert_port;
mod token_storage_port;

pub use air_quality_port::{AirQualityPort, Credentials, Registration};
pub use alert_port::AlertPort;
pub use token_storage_port::TokenStoragePort;
