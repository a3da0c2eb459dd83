//! Airsense - a terminal client for an air-quality monitoring service.
//!
//! Signs users in against the backend, lists geolocated sensors with their
//! latest particulate readings classified into AQI levels, manages sensor
//! subscriptions and shows notifications. The session credential lives in
//! the OS keyring (or a file, or memory) and is attached to every request.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing navigation and screens.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "airsense";
