//! Named transport channels and the frame that carries them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ProtocolError;

/// Transport channels. The serialised names are part of the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Asynchronous, bidirectional Envelope/CorrelatedCall channel.
    #[serde(rename = "message")]
    Message,
    /// Synchronous configuration read.
    #[serde(rename = "config")]
    Config,
    /// Synchronous spell-check query.
    #[serde(rename = "typo")]
    Typo,
    /// Synchronous citation formatting.
    #[serde(rename = "getCitation")]
    GetCitation,
    /// Synchronous citation item refresh.
    #[serde(rename = "updateItems")]
    UpdateItems,
}

impl Channel {
    /// Every channel, in protocol order.
    pub const ALL: [Self; 5] = [
        Self::Message,
        Self::Config,
        Self::Typo,
        Self::GetCitation,
        Self::UpdateItems,
    ];

    /// Returns the wire name of the channel.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Config => "config",
            Self::Typo => "typo",
            Self::GetCitation => "getCitation",
            Self::UpdateItems => "updateItems",
        }
    }

    /// Whether the caller blocks until the reply frame arrives.
    #[must_use]
    pub const fn is_synchronous(self) -> bool {
        !matches!(self, Self::Message)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One line on the wire: a channel name and its payload.
///
/// ```json
/// {"channel":"message","payload":{"command":"toggle-theme"}}
/// {"channel":"typo","payload":{"type":"check","term":"teh"}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelFrame {
    /// Channel the payload travels on.
    pub channel: Channel,
    /// Channel-specific payload.
    #[serde(default)]
    pub payload: Value,
}

impl ChannelFrame {
    /// Builds a frame.
    #[must_use]
    pub fn new(channel: Channel, payload: Value) -> Self {
        Self { channel, payload }
    }

    /// Parses a single frame line. Trailing whitespace, including the line
    /// terminator, is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::EmptyFrame`] for blank lines and
    /// [`ProtocolError::Malformed`] when the JSON does not describe a frame.
    pub fn parse(line: &[u8]) -> Result<Self, ProtocolError> {
        let trimmed = trim_trailing_whitespace(line);
        if trimmed.is_empty() {
            return Err(ProtocolError::EmptyFrame);
        }
        serde_json::from_slice(trimmed).map_err(ProtocolError::from_json_error)
    }

    /// Serialises the frame as a newline-terminated line.
    ///
    /// # Errors
    ///
    /// Returns the serde error if the payload cannot be encoded.
    pub fn to_line(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }
}

fn trim_trailing_whitespace(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |pos| pos + 1);
    &bytes[..end]
}
