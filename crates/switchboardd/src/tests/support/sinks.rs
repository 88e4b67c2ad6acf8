//! Recording frontend sink and reply-to capability.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use switchboard_protocol::{Channel, Envelope};

use crate::collaborators::ReplyTo;
use crate::dispatch::{DispatchError, FrontendSink};

/// Frontend sink that stores every envelope. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    envelopes: Arc<Mutex<Vec<Envelope>>>,
    failing: bool,
}

impl RecordingSink {
    /// Sink whose deliveries always fail.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn envelopes(&self) -> Vec<Envelope> {
        self.envelopes.lock().expect("sink lock").clone()
    }
}

impl FrontendSink for RecordingSink {
    fn deliver(&mut self, envelope: &Envelope) -> Result<(), DispatchError> {
        if self.failing {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "frontend gone").into());
        }
        self.envelopes
            .lock()
            .expect("sink lock")
            .push(envelope.clone());
        Ok(())
    }
}

/// Reply-to capability recording replies and drag requests.
#[derive(Debug, Clone, Default)]
pub struct RecordingReplyTo {
    replies: Arc<Mutex<Vec<(Channel, Value)>>>,
    drags: Arc<Mutex<Vec<PathBuf>>>,
    broken: bool,
}

impl RecordingReplyTo {
    /// Capability whose writes always fail.
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn replies(&self) -> Vec<(Channel, Value)> {
        self.replies.lock().expect("replies lock").clone()
    }

    pub fn drags(&self) -> Vec<PathBuf> {
        self.drags.lock().expect("drags lock").clone()
    }

    fn check(&self) -> Result<(), DispatchError> {
        if self.broken {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection closed").into());
        }
        Ok(())
    }
}

impl ReplyTo for RecordingReplyTo {
    fn reply(&mut self, channel: Channel, payload: Value) -> Result<(), DispatchError> {
        self.check()?;
        self.replies
            .lock()
            .expect("replies lock")
            .push((channel, payload));
        Ok(())
    }

    fn start_drag(&mut self, file: &Path) -> Result<(), DispatchError> {
        self.check()?;
        self.drags
            .lock()
            .expect("drags lock")
            .push(file.to_path_buf());
        Ok(())
    }
}
