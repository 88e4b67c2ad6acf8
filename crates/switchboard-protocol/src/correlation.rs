//! Frontend-side bookkeeping for correlated calls.
//!
//! The backend answers a [`CorrelatedCall`] by echoing it with a
//! `returnValue` and forgets it immediately. Whoever issued the call keeps
//! the list of cyphers still waiting for an answer; [`PendingCalls`] is that
//! list.

use std::collections::HashMap;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::envelope::{CorrelatedCall, Envelope, RETURN_VALUE_FIELD};

/// A call answered by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedCall {
    /// Correlation token of the call.
    pub cypher: String,
    /// Command that was invoked.
    pub command: String,
    /// Value the backend attached.
    pub return_value: Value,
}

/// Outcome of offering an inbound `message` payload to [`PendingCalls`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The payload answered a pending call, which is now removed.
    Completed(CompletedCall),
    /// The payload carries a cypher nobody is waiting for.
    Unmatched {
        /// The unexpected cypher.
        cypher: String,
    },
    /// The payload is an ordinary notification, not a reply.
    Notification,
}

/// Outstanding correlated calls, keyed by cypher.
#[derive(Debug, Default)]
pub struct PendingCalls {
    pending: HashMap<String, String>,
}

impl PendingCalls {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a call for `command`, recording a fresh cypher.
    pub fn begin(&mut self, command: impl Into<String>, content: Value) -> CorrelatedCall {
        let cypher = Uuid::new_v4().to_string();
        let envelope = Envelope::new(command, content);
        self.pending
            .insert(cypher.clone(), envelope.command.clone());
        CorrelatedCall::new(cypher, envelope)
    }

    /// Matches an inbound payload against the pending calls.
    pub fn resolve(&mut self, message: &Map<String, Value>) -> Resolution {
        let Some(cypher) = CorrelatedCall::cypher_of(message) else {
            return Resolution::Notification;
        };
        match self.pending.remove(cypher) {
            Some(command) => Resolution::Completed(CompletedCall {
                cypher: cypher.to_owned(),
                command,
                return_value: message
                    .get(RETURN_VALUE_FIELD)
                    .cloned()
                    .unwrap_or(Value::Null),
            }),
            None => Resolution::Unmatched {
                cypher: cypher.to_owned(),
            },
        }
    }

    /// Whether `cypher` is still waiting for a reply.
    #[must_use]
    pub fn is_pending(&self, cypher: &str) -> bool {
        self.pending.contains_key(cypher)
    }

    /// Number of unanswered calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no calls are outstanding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
