//! Error types for message routing and dispatch.
//!
//! None of these errors reach the frontend. The router logs them (or, for
//! the soft-fail kinds, swallows them) and carries on with the next message.

use std::io;

use thiserror::Error;

use switchboard_protocol::ProtocolError;

use super::registry::Mode;

/// Errors surfaced while routing a message or answering a query.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Message could not be interpreted at all.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// No handler is registered for the command in the requested mode.
    #[error("unknown {mode} command '{command}'")]
    UnknownCommand { command: String, mode: Mode },

    /// Content did not match the handler's expected shape.
    #[error("invalid content for '{command}': {message}")]
    InvalidContent { command: String, message: String },

    /// A file or directory reference no longer resolves.
    #[error("'{command}' references unknown item {reference}")]
    UnresolvedReference { command: String, reference: String },

    /// Window command issued while no window has focus.
    #[error("no active window for '{command}'")]
    NoActiveWindow { command: String },

    /// An optional collaborator has not been installed yet.
    #[error("{collaborator} is not available")]
    UnavailableCollaborator { collaborator: &'static str },

    /// The shared router lock was poisoned by a panicking handler.
    #[error("router lock poisoned")]
    Poisoned,

    /// Frame serialization failed.
    #[error("failed to serialize frame: {0}")]
    Serialize(#[from] serde_json::Error),

    /// IO error while writing to a connection.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl DispatchError {
    /// Whether the failure is an expected soft-fail that leaves no log
    /// line above `trace`.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedReference { .. } | Self::NoActiveWindow { .. }
        )
    }

    /// Creates an unknown command error.
    pub fn unknown_command(command: impl Into<String>, mode: Mode) -> Self {
        Self::UnknownCommand {
            command: command.into(),
            mode,
        }
    }

    /// Creates an invalid content error.
    pub fn invalid_content(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidContent {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Creates an unresolved reference error.
    pub fn unresolved(command: impl Into<String>, reference: impl ToString) -> Self {
        Self::UnresolvedReference {
            command: command.into(),
            reference: reference.to_string(),
        }
    }

    /// Creates a no active window error.
    pub fn no_active_window(command: impl Into<String>) -> Self {
        Self::NoActiveWindow {
            command: command.into(),
        }
    }

    /// Creates an unavailable collaborator error.
    pub fn unavailable(collaborator: &'static str) -> Self {
        Self::UnavailableCollaborator { collaborator }
    }
}
