//! Reading and writing configuration files.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};
use super::state_config::StateConfig;

const CONFIG_FILE_NAME: &str = "config.toml";
const STATE_FILE_NAME: &str = "state.toml";

/// Configuration storage errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No user config directory on this platform.
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Could not encode TOML.
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Reads and writes `config.toml` and `state.toml` in the user config directory.
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(ConfigError::ConfigDirNotFound)?;

        Ok(Self { config_dir })
    }

    /// Uses `path` as the config directory.
    #[must_use]
    pub const fn with_dir(path: PathBuf) -> Self {
        Self { config_dir: path }
    }

    /// Directory holding both files.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created.
    pub fn ensure_config_dir(&self) -> Result<(), ConfigError> {
        if !self.config_dir.exists() {
            info!(path = ?self.config_dir, "Creating configuration directory");
            fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }

    /// Loads `config.toml`, writing defaults on first run. A file that does
    /// not parse yields defaults and is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the default cannot be written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let config_path = path_override.map_or_else(
            || self.config_dir.join(CONFIG_FILE_NAME),
            Path::to_path_buf,
        );

        if !config_path.exists() {
            info!(path = ?config_path, "Config file not found, writing defaults");
            let default_config = AppConfig::default();
            if let Some(parent) = config_path.parent() {
                fs::create_dir_all(parent)?;
            }
            Self::save_to_file(&config_path, &default_config)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&config_path)?;
        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(error = %e, "Failed to parse config file, using defaults");
                Ok(AppConfig::default())
            }
        }
    }

    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read.
    pub fn load_state(&self) -> Result<StateConfig, ConfigError> {
        let state_path = self.config_dir.join(STATE_FILE_NAME);

        if !state_path.exists() {
            return Ok(StateConfig::default());
        }

        let content = fs::read_to_string(&state_path)?;
        match toml::from_str::<StateConfig>(&content) {
            Ok(state) => Ok(state),
            Err(e) => {
                warn!(error = %e, "Failed to parse state file, resetting state");
                Ok(StateConfig::default())
            }
        }
    }

    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be written.
    pub fn save_state(&self, state: &StateConfig) -> Result<(), ConfigError> {
        self.ensure_config_dir()?;
        let state_path = self.config_dir.join(STATE_FILE_NAME);
        debug!(
            read = state.read_notifications.len(),
            "Saving notification read state"
        );
        Self::save_to_file(&state_path, state)
    }

    fn save_to_file<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(data)?;

        let parent = path
            .parent()
            .ok_or_else(|| std::io::Error::other("Invalid path"))?;
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}
