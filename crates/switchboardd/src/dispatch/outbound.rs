//! Outbound pushes to the frontend.

use serde_json::Value;
use tracing::{debug, warn};

use switchboard_protocol::{Envelope, empty_content};

use super::errors::DispatchError;
use super::router::DISPATCH_TARGET;

/// Destination of [`Outbound::send`]: the frontend's inbound `message`
/// channel.
pub trait FrontendSink: Send {
    /// Delivers one envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope could not be written.
    fn deliver(&mut self, envelope: &Envelope) -> Result<(), DispatchError>;
}

/// Identifies an attached frontend so a closing connection detaches only
/// itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontendId(u64);

struct AttachedFrontend {
    id: FrontendId,
    sink: Box<dyn FrontendSink>,
}

/// Holder of the attached frontends.
///
/// Pushes go to the most recently attached frontend that is still open.
/// When it detaches, the next most recent one takes over.
#[derive(Default)]
pub struct Outbound {
    frontends: Vec<AttachedFrontend>,
    next_id: u64,
}

impl Outbound {
    /// Creates an outbound path with no frontend attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `sink` the push target. Earlier frontends stay attached behind
    /// it.
    pub fn attach(&mut self, sink: Box<dyn FrontendSink>) -> FrontendId {
        self.next_id += 1;
        let id = FrontendId(self.next_id);
        if !self.frontends.is_empty() {
            debug!(
                target: DISPATCH_TARGET,
                shadowed = self.frontends.len(),
                "newer frontend takes over pushes"
            );
        }
        self.frontends.push(AttachedFrontend { id, sink });
        id
    }

    /// Detaches the frontend identified by `id`. Returns `false` if it was
    /// not attached.
    pub fn detach(&mut self, id: FrontendId) -> bool {
        let Some(position) = self.frontends.iter().position(|frontend| frontend.id == id) else {
            return false;
        };
        self.frontends.remove(position);
        if position == self.frontends.len() && !self.frontends.is_empty() {
            debug!(target: DISPATCH_TARGET, "pushes fall back to earlier frontend");
        }
        true
    }

    /// Whether a frontend is attached.
    pub fn has_frontend(&self) -> bool {
        !self.frontends.is_empty()
    }

    /// Pushes `{command, content}` to the frontend.
    ///
    /// Without a frontend this is a no-op. Delivery failures are logged and
    /// otherwise ignored.
    pub fn send(&mut self, command: &str, content: Value) {
        let Some(frontend) = self.frontends.last_mut() else {
            debug!(target: DISPATCH_TARGET, command, "no frontend attached; dropping push");
            return;
        };
        let envelope = Envelope::new(command, content);
        if let Err(error) = frontend.sink.deliver(&envelope) {
            warn!(target: DISPATCH_TARGET, command, %error, "failed to push to frontend");
        }
    }

    /// Pushes `command` with empty content.
    pub fn notify(&mut self, command: &str) {
        self.send(command, empty_content());
    }
}

impl std::fmt::Debug for Outbound {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Outbound")
            .field("current", &self.frontends.last().map(|frontend| frontend.id))
            .field("attached", &self.frontends.len())
            .finish()
    }
}
