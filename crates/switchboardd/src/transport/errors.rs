//! Failures of the frontend socket.

use std::io;

use thiserror::Error;

/// Why a leftover Unix socket file could not be reclaimed.
#[cfg(unix)]
#[derive(Debug, Error)]
pub enum StaleSocketError {
    #[error("another backend is accepting connections on it")]
    InUse,
    #[error("it is not a socket")]
    NotASocket,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Errors surfaced while binding or running the frontend listener.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The configured endpoint could not be bound.
    #[error("cannot bind frontend socket {endpoint}: {source}")]
    Bind {
        endpoint: String,
        #[source]
        source: io::Error,
    },
    /// A socket file already occupies the configured path.
    #[cfg(unix)]
    #[error("cannot reclaim frontend socket {path}: {source}")]
    StaleSocket {
        path: String,
        #[source]
        source: StaleSocketError,
    },
    #[cfg(not(unix))]
    #[error("unix frontend sockets are unsupported: {endpoint}")]
    UnsupportedUnix { endpoint: String },
    #[error("failed to enable non-blocking accept: {source}")]
    NonBlocking {
        #[source]
        source: io::Error,
    },
    #[error("frontend listener thread panicked")]
    ThreadPanic,
}

impl ListenerError {
    pub(crate) fn bind(endpoint: impl ToString, source: io::Error) -> Self {
        Self::Bind {
            endpoint: endpoint.to_string(),
            source,
        }
    }
}
