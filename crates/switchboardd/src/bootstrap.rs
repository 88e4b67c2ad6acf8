//! Backend bootstrap orchestration.

use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;
use tracing::info;

use switchboard_config::{Config, SocketPreparationError};

use crate::collaborators::Collaborators;
use crate::dispatch::{Router, SharedRouter};
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

const BOOTSTRAP_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::bootstrap");

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the backend configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader returning a configuration resolved elsewhere.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        #[source]
        source: TelemetryError,
    },
    /// Socket preparation failed.
    #[error("failed to prepare frontend socket: {source}")]
    Socket {
        #[source]
        source: SocketPreparationError,
    },
}

/// A configured backend whose router is ready to accept frames.
#[derive(Debug)]
pub struct Backend {
    config: Config,
    router: SharedRouter,
    telemetry: TelemetryHandle,
}

impl Backend {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle to the shared router.
    #[must_use]
    pub fn router(&self) -> SharedRouter {
        self.router.clone()
    }

    #[must_use]
    pub fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }
}

/// Loads configuration, starts telemetry, prepares the socket directory
/// and builds the router over `collaborators`.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    collaborators: Collaborators,
) -> Result<Backend, BootstrapError> {
    let config = loader
        .load()
        .map_err(|source| BootstrapError::Configuration { source })?;
    let telemetry =
        telemetry::initialise(&config).map_err(|source| BootstrapError::Telemetry { source })?;
    config
        .frontend_socket()
        .prepare_filesystem()
        .map_err(|source| BootstrapError::Socket { source })?;

    info!(
        target: BOOTSTRAP_TARGET,
        socket = %config.frontend_socket(),
        log_filter = %config.log_filter(),
        log_format = ?config.log_format(),
        max_frame_bytes = config.max_frame_bytes(),
        "backend bootstrap completed"
    );

    Ok(Backend {
        router: SharedRouter::new(Router::new(collaborators)),
        config,
        telemetry,
    })
}
