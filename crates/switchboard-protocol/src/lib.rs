//! Wire types shared by the switchboard frontend and backend.
//!
//! Everything crossing the process boundary is a [`ChannelFrame`]: a channel
//! name plus a JSON payload. The `message` channel carries [`Envelope`]s
//! (fire-and-forget) and [`CorrelatedCall`]s (request/reply simulated with a
//! caller-chosen `cypher`). The remaining channels are synchronous queries
//! whose payload shapes are described by [`TypoQuery`], [`TypoReply`] and
//! plain JSON values.
//!
//! The backend never tracks outstanding calls. Matching a reply to its
//! request is frontend state, handled by [`PendingCalls`].

mod channel;
pub mod correlation;
mod envelope;
mod errors;
mod hash;
mod typo;

pub use channel::{Channel, ChannelFrame};
pub use correlation::{CompletedCall, PendingCalls, Resolution};
pub use envelope::{
    COMMAND_FIELD, CONTENT_FIELD, CYPHER_FIELD, CorrelatedCall, Envelope, RETURN_VALUE_FIELD,
    empty_content,
};
pub use errors::ProtocolError;
pub use hash::Hash;
pub use typo::{NOT_READY, TypoKind, TypoQuery, TypoReply};
