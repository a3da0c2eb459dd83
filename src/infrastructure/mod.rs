//! Infrastructure layer with external service adapters.

/// Terminal alerts.
pub mod alerts;
/// Air-quality backend client.
pub mod backend;
/// Application configuration.
pub mod config;
/// Token storage adapters.
pub mod storage;

pub use alerts::TerminalAlerts;
pub use backend::{ApiClient, FetchOptions, HttpAirQualityClient};
pub use config::{AppConfig, CliArgs, Command, LogLevel, StorageManager, TokenBackend};
pub use storage::{FileTokenStorage, KeyringTokenStorage, MemoryTokenStorage};
