//! Envelope and CorrelatedCall message shapes for the `message` channel.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ProtocolError;

/// Field naming the command to run.
pub const COMMAND_FIELD: &str = "command";
/// Field carrying the handler-specific payload.
pub const CONTENT_FIELD: &str = "content";
/// Field carrying the caller's correlation token.
pub const CYPHER_FIELD: &str = "cypher";
/// Field the backend adds to a CorrelatedCall before echoing it back.
pub const RETURN_VALUE_FIELD: &str = "returnValue";

/// Content used when a message omits `content`.
#[must_use]
pub fn empty_content() -> Value {
    Value::Object(Map::new())
}

/// Fire-and-forget message: `{ command, content }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Command selecting the handler.
    pub command: String,
    /// Handler-specific payload; `{}` when omitted.
    #[serde(default = "empty_content")]
    pub content: Value,
}

impl Envelope {
    /// Builds an envelope with explicit content.
    #[must_use]
    pub fn new(command: impl Into<String>, content: Value) -> Self {
        Self {
            command: command.into(),
            content,
        }
    }

    /// Builds an envelope whose content is the empty object.
    #[must_use]
    pub fn notify(command: impl Into<String>) -> Self {
        Self::new(command, empty_content())
    }

    /// Extracts an envelope from a decoded message object.
    ///
    /// Only a missing `content` field defaults to `{}`; an explicit `null`
    /// is passed through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingCommand`] when `command` is absent or
    /// not a string.
    pub fn from_object(object: &Map<String, Value>) -> Result<Self, ProtocolError> {
        let command = object
            .get(COMMAND_FIELD)
            .and_then(Value::as_str)
            .ok_or(ProtocolError::MissingCommand)?;
        let content = object
            .get(CONTENT_FIELD)
            .cloned()
            .unwrap_or_else(empty_content);
        Ok(Self::new(command, content))
    }

    /// Converts the envelope into its JSON object form.
    #[must_use]
    pub fn into_value(self) -> Value {
        let mut object = Map::new();
        object.insert(COMMAND_FIELD.to_owned(), Value::String(self.command));
        object.insert(CONTENT_FIELD.to_owned(), self.content);
        Value::Object(object)
    }
}

/// Envelope plus a correlation token, answered with `returnValue`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelatedCall {
    /// Caller-generated, non-empty correlation token.
    pub cypher: String,
    /// Command and content.
    #[serde(flatten)]
    pub envelope: Envelope,
    /// Result attached by the backend; absent on requests.
    #[serde(
        rename = "returnValue",
        default,
        skip_serializing_if = "Value::is_null"
    )]
    pub return_value: Value,
}

impl CorrelatedCall {
    /// Builds an unanswered call.
    #[must_use]
    pub fn new(cypher: impl Into<String>, envelope: Envelope) -> Self {
        Self {
            cypher: cypher.into(),
            envelope,
            return_value: Value::Null,
        }
    }

    /// Returns the cypher of a message object when it marks a correlated
    /// call. Missing, non-string and empty cyphers all mean "plain
    /// envelope".
    #[must_use]
    pub fn cypher_of(object: &Map<String, Value>) -> Option<&str> {
        object
            .get(CYPHER_FIELD)
            .and_then(Value::as_str)
            .filter(|cypher| !cypher.is_empty())
    }

    /// Builds the reply for a call: the original object, untouched apart
    /// from the added `returnValue`.
    #[must_use]
    pub fn reply_from(mut original: Map<String, Value>, return_value: Value) -> Value {
        original.insert(RETURN_VALUE_FIELD.to_owned(), return_value);
        Value::Object(original)
    }
}
