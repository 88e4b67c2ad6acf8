//! Protocol-level failures.

use thiserror::Error;

/// Errors raised while decoding frames and messages.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Frame line was empty after trimming.
    #[error("empty frame")]
    EmptyFrame,

    /// Frame or payload was not valid JSON for the expected shape.
    #[error("malformed frame: {message}")]
    Malformed {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A `message` payload was not a JSON object.
    #[error("message payload must be a JSON object")]
    NotAnObject,

    /// A `message` payload carried no usable `command` field.
    #[error("message has no command")]
    MissingCommand,
}

impl ProtocolError {
    /// Wraps a serde error.
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::Malformed {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a malformed error with a custom message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
            source: None,
        }
    }
}
