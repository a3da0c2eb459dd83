//! Command-line interface.

use super::app_config::{LogLevel, TokenBackend};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "airsense",
    version,
    about = "Air-quality sensors, readings and alerts in your terminal",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Backend base URL.
    #[arg(long, env = "AIRSENSE_API_BASE_URL", value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECONDS")]
    pub request_timeout: Option<u64>,

    /// Where to keep the session credential.
    #[arg(long, value_enum)]
    pub token_backend: Option<TokenBackend>,

    /// Disable coloured output.
    #[arg(long)]
    pub no_color: bool,

    /// Screen to open. Without one, the start screen follows the session.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Screen or action to run.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Sign in.
    Login {
        /// Account email.
        #[arg(long, env = "AIRSENSE_EMAIL")]
        email: String,
        /// Account password.
        #[arg(long, env = "AIRSENSE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Push token to register for notifications.
        #[arg(long, env = "AIRSENSE_PUSH_TOKEN", hide_env_values = true)]
        push_token: Option<String>,
    },
    /// Create an account.
    Register {
        /// Account email.
        #[arg(long, env = "AIRSENSE_EMAIL")]
        email: String,
        /// Account password.
        #[arg(long, env = "AIRSENSE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Display name.
        #[arg(long)]
        username: Option<String>,
    },
    /// Confirm an email address.
    VerifyEmail {
        /// Token from the verification link.
        #[arg(long)]
        token: Option<String>,
    },
    /// Show sensors with their latest air quality.
    Sensors,
    /// Show the latest reading of a sensor.
    Reading {
        /// Sensor id.
        sensor_id: String,
    },
    /// Subscribe to a sensor's notifications.
    Subscribe {
        /// Sensor id.
        sensor_id: String,
    },
    /// Unsubscribe from a sensor's notifications.
    Unsubscribe {
        /// Sensor id.
        sensor_id: String,
    },
    /// Show notifications.
    Notifications {
        /// Mark a notification read on this device.
        #[arg(long = "mark-read", value_name = "ID")]
        mark_read: Vec<String>,
    },
    /// Sign out and forget the stored credential.
    Logout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_is_start_screen() {
        let args = CliArgs::try_parse_from(["airsense"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn test_login_arguments() {
        let args = CliArgs::try_parse_from([
            "airsense",
            "login",
            "--email",
            "user@example.com",
            "--password",
            "secret",
        ])
        .unwrap();

        assert_eq!(
            args.command,
            Some(Command::Login {
                email: "user@example.com".to_string(),
                password: "secret".to_string(),
                push_token: None,
            })
        );
    }

    #[test]
    fn test_repeated_mark_read() {
        let args = CliArgs::try_parse_from([
            "airsense",
            "notifications",
            "--mark-read",
            "1",
            "--mark-read",
            "2",
        ])
        .unwrap();

        assert_eq!(
            args.command,
            Some(Command::Notifications {
                mark_read: vec!["1".to_string(), "2".to_string()],
            })
        );
    }

    #[test]
    fn test_subscribe_requires_sensor_id() {
        assert!(CliArgs::try_parse_from(["airsense", "subscribe"]).is_err());
    }
}
