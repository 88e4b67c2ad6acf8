//! Address of the socket the frontend connects to.
//!
//! Written as a URL on the command line and in the environment:
//! `unix:///run/user/1000/switchboard/switchboard.sock` or
//! `tcp://127.0.0.1:9781`. A TCP address without a port uses
//! [`DEFAULT_TCP_PORT`].

use std::fmt;
use std::fs::DirBuilder;
use std::io;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::defaults::DEFAULT_TCP_PORT;

/// Where the backend listens for its frontend.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "transport", rename_all = "snake_case")]
pub enum SocketEndpoint {
    Unix { path: Utf8PathBuf },
    Tcp { host: String, port: u16 },
}

impl SocketEndpoint {
    #[must_use]
    pub fn unix(path: impl Into<Utf8PathBuf>) -> Self {
        Self::Unix { path: path.into() }
    }

    #[must_use]
    pub fn tcp(host: impl Into<String>, port: u16) -> Self {
        Self::Tcp {
            host: host.into(),
            port,
        }
    }

    /// Socket file of a Unix endpoint.
    #[must_use]
    pub fn unix_path(&self) -> Option<&Utf8Path> {
        match self {
            Self::Unix { path } => Some(path.as_path()),
            Self::Tcp { .. } => None,
        }
    }

    /// Creates the directory holding a Unix socket, readable by the owner
    /// only. Existing directories keep their permissions. A no-op for TCP.
    ///
    /// # Errors
    ///
    /// Fails when the socket path has no directory component or the
    /// directory cannot be created.
    pub fn prepare_filesystem(&self) -> Result<(), SocketPreparationError> {
        let Some(path) = self.unix_path() else {
            return Ok(());
        };
        let directory = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .ok_or_else(|| SocketPreparationError::MissingParent {
                path: path.to_path_buf(),
            })?;
        owner_only_dir_builder()
            .create(directory)
            .map_err(|source| SocketPreparationError::CreateDirectory {
                path: directory.to_path_buf(),
                source,
            })
    }
}

fn owner_only_dir_builder() -> DirBuilder {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder
}

impl fmt::Display for SocketEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix { path } => write!(formatter, "unix://{path}"),
            Self::Tcp { host, port } => write!(formatter, "tcp://{host}:{port}"),
        }
    }
}

impl FromStr for SocketEndpoint {
    type Err = SocketParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(input).map_err(|source| SocketParseError::Url {
            input: input.to_owned(),
            source,
        })?;
        let incomplete = |part| SocketParseError::Incomplete {
            input: input.to_owned(),
            part,
        };
        match url.scheme() {
            "unix" if url.path().is_empty() => Err(incomplete("socket path")),
            "unix" => Ok(Self::unix(url.path())),
            "tcp" => {
                let host = url.host_str().ok_or_else(|| incomplete("host"))?;
                Ok(Self::tcp(host, url.port().unwrap_or(DEFAULT_TCP_PORT)))
            }
            scheme => Err(SocketParseError::Scheme {
                input: input.to_owned(),
                scheme: scheme.to_owned(),
            }),
        }
    }
}

/// A frontend socket URL that cannot be used.
#[derive(Debug, Error)]
pub enum SocketParseError {
    #[error("frontend socket '{input}' is not a URL: {source}")]
    Url {
        input: String,
        #[source]
        source: url::ParseError,
    },
    #[error("frontend socket '{input}' uses '{scheme}'; expected unix or tcp")]
    Scheme { input: String, scheme: String },
    #[error("frontend socket '{input}' has no {part}")]
    Incomplete { input: String, part: &'static str },
}

/// Failure to create the directory of a Unix frontend socket.
#[derive(Debug, Error)]
pub enum SocketPreparationError {
    #[error("socket path '{path}' has no parent directory")]
    MissingParent { path: Utf8PathBuf },
    #[error("failed to create socket directory '{path}': {source}")]
    CreateDirectory {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}
