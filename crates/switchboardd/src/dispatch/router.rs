//! Router façade: classifies inbound frames and hands them to handlers.

use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use switchboard_protocol::{Channel, ChannelFrame, CorrelatedCall, Envelope, ProtocolError};

use crate::collaborators::{CitationEngine, Collaborators, Dictionary, ReplyTo};

use super::errors::DispatchError;
use super::outbound::{FrontendId, FrontendSink, Outbound};
use super::registry::{CommandTable, HandlerContext, Mode};
use super::sync_channels::{self, SYNC_TARGET};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// What became of one inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Notification handled.
    Dispatched { command: String },
    /// Intercept command handled before classification.
    Intercepted { command: String },
    /// Correlated call answered on the originating connection.
    Replied { command: String },
    /// Synchronous query answered.
    Answered { channel: Channel },
    /// Expected soft failure such as a stale hash; nothing happened.
    SoftFailed { command: String },
    /// No handler for the command in the requested mode.
    Unknown { command: String },
    /// Handler or reply failed; the error was logged.
    Failed { command: String },
    /// Message could not be interpreted; nothing ran.
    Dropped,
}

/// Routes frontend messages to backend collaborators and pushes updates
/// back.
pub struct Router {
    collaborators: Collaborators,
    outbound: Outbound,
    table: &'static CommandTable,
}

impl Router {
    /// Builds a router over the given collaborators with no frontend
    /// attached.
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            collaborators,
            outbound: Outbound::new(),
            table: CommandTable::global(),
        }
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    pub fn collaborators_mut(&mut self) -> &mut Collaborators {
        &mut self.collaborators
    }

    /// Makes `sink` the target of [`Router::send`] until it detaches or a
    /// newer frontend attaches.
    pub fn attach_frontend(&mut self, sink: Box<dyn FrontendSink>) -> FrontendId {
        self.outbound.attach(sink)
    }

    /// Detaches the frontend identified by `id`. Pushes fall back to the
    /// most recent frontend still attached.
    pub fn detach_frontend(&mut self, id: FrontendId) -> bool {
        self.outbound.detach(id)
    }

    /// Whether pushes currently have somewhere to go.
    pub fn has_frontend(&self) -> bool {
        self.outbound.has_frontend()
    }

    /// Pushes `{command, content}` to the frontend. A no-op without one.
    pub fn send(&mut self, command: &str, content: Value) {
        self.outbound.send(command, content);
    }

    /// Pushes `{command, content: {}}` to the frontend.
    pub fn notify(&mut self, command: &str) {
        self.outbound.notify(command);
    }

    /// Installs the spell-check dictionary once it has loaded.
    pub fn install_dictionary(&mut self, dictionary: Box<dyn Dictionary>) {
        debug!(target: SYNC_TARGET, "dictionary installed");
        self.collaborators.dictionary = Some(dictionary);
    }

    /// Installs the citation engine once a library has loaded.
    pub fn install_citation_engine(&mut self, engine: Box<dyn CitationEngine>) {
        debug!(target: SYNC_TARGET, "citation engine installed");
        self.collaborators.citations = Some(engine);
    }

    /// Routes a frame from any channel.
    pub fn handle_frame(&mut self, frame: ChannelFrame, reply_to: &mut dyn ReplyTo) -> Disposition {
        let ChannelFrame { channel, payload } = frame;
        if channel.is_synchronous() {
            let answer = self.answer_query(channel, payload);
            return match reply_to.reply(channel, answer) {
                Ok(()) => Disposition::Answered { channel },
                Err(error) => {
                    warn!(target: SYNC_TARGET, channel = channel.as_str(), %error, "failed to reply");
                    Disposition::Failed {
                        command: channel.as_str().to_owned(),
                    }
                }
            };
        }
        self.handle_message(payload, reply_to)
    }

    /// Answers a synchronous query. Queries that cannot be answered yield
    /// `null`.
    pub fn answer_query(&mut self, channel: Channel, payload: Value) -> Value {
        match sync_channels::answer(&mut self.collaborators, channel, payload) {
            Ok(answer) => answer,
            Err(error) => {
                warn!(target: SYNC_TARGET, channel = channel.as_str(), %error, "query unanswered");
                Value::Null
            }
        }
    }

    /// Classifies and dispatches one `message` channel payload.
    ///
    /// Intercept commands run first, then correlated calls (non-empty
    /// `cypher`), then plain notifications.
    pub fn handle_message(&mut self, payload: Value, reply_to: &mut dyn ReplyTo) -> Disposition {
        let Value::Object(object) = payload else {
            return dropped(&ProtocolError::NotAnObject);
        };
        let envelope = match Envelope::from_object(&object) {
            Ok(envelope) => envelope,
            Err(error) => return dropped(&error),
        };
        let Envelope { command, content } = envelope;

        if self.table.intercepts(&command) {
            let result = self.invoke(&command, Mode::Intercept, content, reply_to);
            return settle(command, Mode::Intercept, result);
        }

        if CorrelatedCall::cypher_of(&object).is_some() {
            return self.reply_to_call(object, command, content, reply_to);
        }

        let result = self.invoke(&command, Mode::Notify, content, reply_to);
        settle(command, Mode::Notify, result)
    }

    fn reply_to_call(
        &mut self,
        object: Map<String, Value>,
        command: String,
        content: Value,
        reply_to: &mut dyn ReplyTo,
    ) -> Disposition {
        let result = self.invoke(&command, Mode::Call, content, reply_to);
        let return_value = match result {
            Ok(value) => value,
            Err(error) => {
                log_failure(&command, Mode::Call, &error);
                Value::Null
            }
        };
        let reply = CorrelatedCall::reply_from(object, return_value);
        match reply_to.reply(Channel::Message, reply) {
            Ok(()) => Disposition::Replied { command },
            Err(error) => {
                warn!(
                    target: DISPATCH_TARGET,
                    command = command.as_str(),
                    %error,
                    "failed to deliver call reply"
                );
                Disposition::Failed { command }
            }
        }
    }

    fn invoke(
        &mut self,
        command: &str,
        mode: Mode,
        content: Value,
        reply_to: &mut dyn ReplyTo,
    ) -> Result<Value, DispatchError> {
        let spec = self.table.resolve(command, mode)?;
        trace!(target: DISPATCH_TARGET, command, mode = mode.as_str(), "dispatching");
        let mut context = HandlerContext {
            collaborators: &mut self.collaborators,
            outbound: &mut self.outbound,
            reply_to,
            mode,
        };
        (spec.handler)(&mut context, content)
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Router")
            .field("collaborators", &self.collaborators)
            .field("has_frontend", &self.outbound.has_frontend())
            .finish()
    }
}

fn dropped(error: &ProtocolError) -> Disposition {
    warn!(target: DISPATCH_TARGET, %error, "dropping message");
    Disposition::Dropped
}

fn settle(command: String, mode: Mode, result: Result<Value, DispatchError>) -> Disposition {
    match result {
        Ok(_) if mode == Mode::Intercept => Disposition::Intercepted { command },
        Ok(_) => Disposition::Dispatched { command },
        Err(error) => {
            log_failure(&command, mode, &error);
            match error {
                error if error.is_silent() => Disposition::SoftFailed { command },
                DispatchError::UnknownCommand { .. } => Disposition::Unknown { command },
                _ => Disposition::Failed { command },
            }
        }
    }
}

fn log_failure(command: &str, mode: Mode, error: &DispatchError) {
    if error.is_silent() {
        trace!(target: DISPATCH_TARGET, command, mode = mode.as_str(), %error, "soft failure");
    } else {
        warn!(target: DISPATCH_TARGET, command, mode = mode.as_str(), %error, "command failed");
    }
}
