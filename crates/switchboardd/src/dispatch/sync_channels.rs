//! Answers for the synchronous query channels.
//!
//! Every query gets exactly one reply. A query that cannot be answered
//! yields an error here; the router logs it and replies `null` so the
//! caller never blocks waiting.

use serde_json::Value;
use tracing::trace;

use switchboard_protocol::{Channel, TypoKind, TypoQuery, TypoReply};

use crate::collaborators::{CitationEngine, Collaborators};

use super::errors::DispatchError;
use super::registry::parse_content;

/// Tracing target for synchronous queries.
pub(crate) const SYNC_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::sync");

/// Produces the reply for a query on a synchronous `channel`.
///
/// # Errors
///
/// Returns [`DispatchError::InvalidContent`] for payloads of the wrong
/// shape (or when handed the asynchronous `message` channel) and
/// [`DispatchError::UnavailableCollaborator`] for citation queries before
/// an engine is installed.
pub(crate) fn answer(
    collaborators: &mut Collaborators,
    channel: Channel,
    payload: Value,
) -> Result<Value, DispatchError> {
    trace!(target: SYNC_TARGET, channel = channel.as_str(), "answering query");
    match channel {
        Channel::Config => config(collaborators, payload),
        Channel::Typo => typo(collaborators, payload).map(TypoReply::into_value),
        Channel::GetCitation => {
            let ids: Vec<String> = parse_content(channel.as_str(), payload)?;
            Ok(citations(collaborators)?.citation(&ids))
        }
        Channel::UpdateItems => {
            let ids: Vec<String> = parse_content(channel.as_str(), payload)?;
            Ok(citations(collaborators)?.update_items(&ids))
        }
        Channel::Message => Err(DispatchError::invalid_content(
            channel.as_str(),
            "not a synchronous channel",
        )),
    }
}

fn config(collaborators: &Collaborators, payload: Value) -> Result<Value, DispatchError> {
    let key: String = parse_content(Channel::Config.as_str(), payload)?;
    Ok(collaborators.config.get(&key))
}

fn typo(collaborators: &Collaborators, payload: Value) -> Result<TypoReply, DispatchError> {
    let query: TypoQuery = parse_content(Channel::Typo.as_str(), payload)?;
    let reply = match (collaborators.dictionary.as_deref(), query.kind) {
        (None, TypoKind::Check) => TypoReply::NotReady,
        (None, TypoKind::Suggest) => TypoReply::Suggestions(Vec::new()),
        (Some(dictionary), TypoKind::Check) => TypoReply::Verdict(dictionary.check(&query.term)),
        (Some(dictionary), TypoKind::Suggest) => {
            TypoReply::Suggestions(dictionary.suggest(&query.term))
        }
    };
    Ok(reply)
}

fn citations(
    collaborators: &mut Collaborators,
) -> Result<&mut (dyn CitationEngine + 'static), DispatchError> {
    collaborators
        .citations
        .as_deref_mut()
        .ok_or_else(|| DispatchError::unavailable("citation engine"))
}
