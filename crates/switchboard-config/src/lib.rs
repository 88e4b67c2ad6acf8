//! Shared configuration for the switchboard router daemon.
//!
//! Values are layered by [`ortho_config`]: built-in defaults first, then a
//! TOML file (`--config-path` or `SWITCHBOARD_CONFIG_PATH`), then
//! `SWITCHBOARD_*` environment variables, then command-line flags.
//!
//! The configuration only covers the daemon itself: where the frontend
//! connects, how telemetry is emitted, and transport limits. Application
//! preferences served over the `config` channel belong to the configuration
//! store collaborator, not to this crate.

mod defaults;
mod logging;
mod socket;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MAX_FRAME_BYTES, DEFAULT_TCP_PORT, default_log_filter,
    default_log_filter_string, default_log_format, default_socket_endpoint,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use socket::{SocketEndpoint, SocketParseError, SocketPreparationError};

/// Resolved daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "SWITCHBOARD")]
pub struct Config {
    /// Endpoint the frontend connects to.
    #[ortho_config(default = default_socket_endpoint())]
    pub frontend_socket: SocketEndpoint,
    /// `tracing` filter expression.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log lines.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Largest accepted transport frame, in bytes.
    #[ortho_config(default = DEFAULT_MAX_FRAME_BYTES)]
    pub max_frame_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frontend_socket: default_socket_endpoint(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
        }
    }
}

impl Config {
    /// Endpoint the frontend connects to.
    #[must_use]
    pub fn frontend_socket(&self) -> &SocketEndpoint {
        &self.frontend_socket
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Transport frame limit in bytes.
    #[must_use]
    pub fn max_frame_bytes(&self) -> usize {
        self.max_frame_bytes
    }
}
