//! Router wired to recording fakes.

use std::path::PathBuf;

use serde_json::Value;

use switchboard_protocol::{Channel, ChannelFrame, Envelope};

use crate::collaborators::{Collaborators, FilePickerRequest};
use crate::dispatch::{Disposition, Router};
use crate::placeholder::{MemoryConfigStore, MemoryTagStore, placeholder_collaborators};

use super::{
    FakeApplication, Recorded, RecordingReplyTo, RecordingSink, RecordingWindows, ScriptedDialogs,
};

/// Placeholder collaborators with in-memory stores, for tests that do not
/// inspect the application.
pub fn collaborators() -> Collaborators {
    placeholder_collaborators()
}

/// A router plus handles on every fake it talks to.
pub struct TestRig {
    router: Router,
    sink: RecordingSink,
    reply_to: RecordingReplyTo,
    application: FakeApplication,
    windows: RecordingWindows,
    dialogs: ScriptedDialogs,
}

impl TestRig {
    /// Router with a recording frontend attached.
    pub fn new() -> Self {
        let mut rig = Self::detached();
        rig.router.attach_frontend(Box::new(rig.sink.clone()));
        rig
    }

    /// Router with no frontend attached.
    pub fn detached() -> Self {
        let application = FakeApplication::default();
        let windows = RecordingWindows::default();
        let dialogs = ScriptedDialogs::default();
        let collaborators = Collaborators::new(
            Box::new(application.clone()),
            Box::new(MemoryConfigStore::new()),
            Box::new(MemoryTagStore::new()),
            Box::new(windows.clone()),
            Box::new(dialogs.clone()),
        );
        Self {
            router: Router::new(collaborators),
            sink: RecordingSink::default(),
            reply_to: RecordingReplyTo::default(),
            application,
            windows,
            dialogs,
        }
    }

    pub fn with_file(self, hash: u64, path: &str, content: &str) -> Self {
        self.application.add_file(hash, path, content);
        self
    }

    pub fn with_dir(self, hash: u64, path: &str) -> Self {
        self.application.add_dir(hash, path, None);
        self
    }

    pub fn with_project(self, hash: u64, path: &str, properties: Value) -> Self {
        self.application.add_dir(hash, path, Some(properties));
        self
    }

    pub fn with_update(self, update: Value) -> Self {
        self.application.offer_update(update);
        self
    }

    pub fn with_focused_window(self) -> Self {
        self.windows.focus();
        self
    }

    pub fn with_picked_files(self, paths: &[&str]) -> Self {
        self.dialogs.select(paths);
        self
    }

    pub fn with_preference(mut self, key: &str, value: Value) -> Self {
        self.router.collaborators_mut().config.set(key, value);
        self
    }

    pub fn with_tag_database(mut self, database: Value) -> Self {
        self.router.collaborators_mut().tags =
            Box::new(MemoryTagStore::new().with_database(database));
        self
    }

    /// Makes every reply on the originating connection fail.
    pub fn with_broken_reply(mut self) -> Self {
        self.reply_to = RecordingReplyTo::broken();
        self
    }

    pub fn router(&mut self) -> &mut Router {
        &mut self.router
    }

    /// Routes a `message` channel payload.
    pub fn message(&mut self, payload: Value) -> Disposition {
        self.router.handle_message(payload, &mut self.reply_to)
    }

    /// Routes a frame from any channel.
    pub fn frame(&mut self, frame: ChannelFrame) -> Disposition {
        self.router.handle_frame(frame, &mut self.reply_to)
    }

    /// Envelopes pushed through `send`.
    pub fn pushes(&self) -> Vec<Envelope> {
        self.sink.envelopes()
    }

    /// Payloads written back on the originating connection's `message`
    /// channel.
    pub fn replies(&self) -> Vec<Value> {
        self.reply_to
            .replies()
            .into_iter()
            .filter(|(channel, _)| *channel == Channel::Message)
            .map(|(_, payload)| payload)
            .collect()
    }

    /// Every reply on the originating connection, with its channel.
    pub fn channel_replies(&self) -> Vec<(Channel, Value)> {
        self.reply_to.replies()
    }

    pub fn drags(&self) -> Vec<PathBuf> {
        self.reply_to.drags()
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.application.calls()
    }

    pub fn window_actions(&self) -> Vec<String> {
        self.windows.actions()
    }

    pub fn standalone_requests(&self) -> Vec<Value> {
        self.windows.standalone_requests()
    }

    pub fn picker_requests(&self) -> Vec<FilePickerRequest> {
        self.dialogs.requests()
    }

    pub fn preference(&self, key: &str) -> Value {
        self.router.collaborators().config.get(key)
    }
}

impl Default for TestRig {
    fn default() -> Self {
        Self::new()
    }
}
