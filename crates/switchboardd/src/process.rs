//! Foreground process supervision: bind, serve, wait for a signal, shut
//! down.

use std::io;
use std::sync::Arc;

use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use thiserror::Error;
use tracing::info;

use crate::bootstrap::{BootstrapError, ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::collaborators::Collaborators;
use crate::placeholder::placeholder_collaborators;
use crate::transport::{FrameConnectionHandler, ListenerError, SocketListener};

const PROCESS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::process");

/// Abstraction over shutdown notification mechanisms.
pub trait ShutdownSignal: Send + Sync {
    /// Blocks until shutdown should proceed.
    fn wait(&self) -> Result<(), ShutdownError>;
}

/// Errors reported by shutdown signal listeners.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// Installing signal handlers failed.
    #[error("failed to install signal handlers: {source}")]
    Install {
        #[source]
        source: io::Error,
    },
}

/// Shutdown listener waiting for `SIGINT` or `SIGTERM`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShutdownSignal;

impl ShutdownSignal for SystemShutdownSignal {
    fn wait(&self) -> Result<(), ShutdownError> {
        let mut signals =
            Signals::new([SIGTERM, SIGINT]).map_err(|source| ShutdownError::Install { source })?;
        if let Some(signal) = signals.forever().next() {
            info!(target: PROCESS_TARGET, signal, "shutdown signal received");
        }
        Ok(())
    }
}

/// Errors surfaced while running the backend process.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
    #[error("frontend listener failed: {0}")]
    Listener(#[from] ListenerError),
    #[error(transparent)]
    Shutdown(#[from] ShutdownError),
}

/// Runs the backend with placeholder collaborators until a termination
/// signal arrives.
pub fn run_backend() -> Result<(), LaunchError> {
    run_foreground(
        &SystemConfigLoader,
        placeholder_collaborators(),
        &SystemShutdownSignal,
    )
}

/// Bootstraps the router, serves the frontend socket and blocks until
/// `shutdown` returns. The Unix socket file is removed on the way out.
pub fn run_foreground(
    loader: &dyn ConfigLoader,
    collaborators: Collaborators,
    shutdown: &dyn ShutdownSignal,
) -> Result<(), LaunchError> {
    let backend = bootstrap_with(loader, collaborators)?;
    let listener = SocketListener::bind(backend.config().frontend_socket())?;
    let handler = FrameConnectionHandler::new(backend.router(), backend.config().max_frame_bytes());
    let listener_handle = listener.start(Arc::new(handler))?;

    shutdown.wait()?;
    listener_handle.shutdown();
    listener_handle.join()?;
    info!(target: PROCESS_TARGET, "shutdown sequence completed");
    Ok(())
}
