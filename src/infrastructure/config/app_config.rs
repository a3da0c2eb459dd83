//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::args::CliArgs;

pub(crate) const APP_NAME: &str = "airsense";
pub(crate) const APP_QUALIFIER: &str = "org";
pub(crate) const APP_ORGANIZATION: &str = "airsense";

const DEFAULT_API_BASE_URL: &str = "http://localhost:3010";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where the session credential is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TokenBackend {
    /// OS secure store.
    #[default]
    Keyring,
    /// TOML file in the user data directory.
    File,
    /// Process memory; nothing survives exit.
    Memory,
}

/// Application configuration from file and CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Base URL of the air-quality backend.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Overall timeout for a single request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Credential storage backend.
    #[serde(default)]
    pub token_backend: TokenBackend,

    /// Push token registered with the backend after login.
    #[serde(default)]
    pub push_token: Option<String>,

    /// Output configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Colour AQI levels and alerts.
    #[serde(default = "default_true")]
    pub color: bool,

    /// Timestamp format string (chrono format).
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            timestamp_format: default_timestamp_format(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

const fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_base_url) = args.api_base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            self.api_base_url = api_base_url.trim().to_string();
        }
        if let Some(timeout) = args.request_timeout {
            self.request_timeout_secs = timeout;
        }
        if let Some(backend) = args.token_backend {
            self.token_backend = backend;
        }
        if args.no_color {
            self.ui.color = false;
        }
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    /// Request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("airsense.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            api_base_url: default_api_base_url(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            token_backend: TokenBackend::default(),
            push_token: None,
            ui: UiConfig::default(),
        }
    }
}
