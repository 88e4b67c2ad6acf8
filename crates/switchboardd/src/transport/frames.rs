//! Connection handler speaking newline-delimited channel frames.
//!
//! Each accepted connection attaches as a frontend. [`Router::send`] pushes
//! to the newest connection still open. Frames are read one line at a time
//! and handed to the shared router together with a [`FrameWriter`] for the
//! same connection, which carries replies and intercept output back to the
//! originator.
//!
//! A `FrameWriter` only queues encoded lines; a dedicated thread per
//! connection performs the socket writes. Writes never happen under the
//! router lock, and a frontend that stops reading backs up only its own
//! queue.
//!
//! [`Router::send`]: crate::dispatch::Router::send

use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use serde_json::{Value, json};
use tracing::{debug, warn};

use switchboard_protocol::{Channel, ChannelFrame, Envelope};

use crate::collaborators::ReplyTo;
use crate::dispatch::{DispatchError, FrontendSink, SharedRouter};

use super::{ConnectionHandler, ConnectionStream, LISTENER_TARGET};

/// Command of the frame asking a window to start a platform drag.
pub(crate) const START_DRAG_COMMAND: &str = "start-drag";

/// Handler that feeds every frame of a connection through the router.
#[derive(Debug, Clone)]
pub(crate) struct FrameConnectionHandler {
    router: SharedRouter,
    max_frame_bytes: usize,
}

impl FrameConnectionHandler {
    pub(crate) fn new(router: SharedRouter, max_frame_bytes: usize) -> Self {
        Self {
            router,
            max_frame_bytes,
        }
    }

    fn serve(&self, stream: ConnectionStream) -> Result<(), DispatchError> {
        let (writer, drain) = FrameWriter::spawn(stream.try_clone()?);
        let frontend = self
            .router
            .with_router(|router| router.attach_frontend(Box::new(writer.clone())))?;

        let result = self.pump(stream, writer);

        let detached = self
            .router
            .with_router(|router| router.detach_frontend(frontend))?;
        debug!(target: LISTENER_TARGET, detached, "frontend disconnected");
        // Every sender is gone once detached, so the drain thread finishes.
        if drain.join().is_err() {
            warn!(target: LISTENER_TARGET, "frame writer thread panicked");
        }
        result
    }

    fn pump(&self, stream: ConnectionStream, mut writer: FrameWriter) -> Result<(), DispatchError> {
        let mut reader = BufReader::new(stream);
        while let Some(line) = read_frame_line(&mut reader, self.max_frame_bytes)? {
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            let frame = match ChannelFrame::parse(&line) {
                Ok(frame) => frame,
                Err(error) => {
                    warn!(target: LISTENER_TARGET, %error, "discarding malformed frame");
                    continue;
                }
            };
            let disposition = self
                .router
                .with_router(|router| router.handle_frame(frame, &mut writer))?;
            debug!(target: LISTENER_TARGET, ?disposition, "frame handled");
        }
        Ok(())
    }
}

impl ConnectionHandler for FrameConnectionHandler {
    fn handle(&self, stream: ConnectionStream) {
        if let Err(error) = self.serve(stream) {
            warn!(target: LISTENER_TARGET, %error, "connection closed with error");
        }
    }
}

/// Write half of a connection, shared by the router's outbound path and the
/// per-frame reply capability.
#[derive(Clone)]
pub(crate) struct FrameWriter {
    queue: Sender<Vec<u8>>,
}

impl FrameWriter {
    /// Starts the thread that owns the write half of `stream`.
    fn spawn(stream: ConnectionStream) -> (Self, JoinHandle<()>) {
        let (queue, lines) = mpsc::channel();
        let drain = thread::spawn(move || drain_lines(stream, &lines));
        (Self { queue }, drain)
    }

    fn write_frame(&self, channel: Channel, payload: Value) -> Result<(), DispatchError> {
        let line = ChannelFrame::new(channel, payload).to_line()?;
        self.queue.send(line).map_err(|_| {
            io::Error::new(io::ErrorKind::BrokenPipe, "connection writer has stopped")
        })?;
        Ok(())
    }
}

/// Writes queued lines until every [`FrameWriter`] is dropped or the peer
/// stops accepting data.
fn drain_lines(mut stream: ConnectionStream, lines: &Receiver<Vec<u8>>) {
    for line in lines {
        if let Err(error) = stream.write_all(&line).and_then(|()| stream.flush()) {
            warn!(target: LISTENER_TARGET, %error, "failed to write frame");
            return;
        }
    }
}

impl FrontendSink for FrameWriter {
    fn deliver(&mut self, envelope: &Envelope) -> Result<(), DispatchError> {
        self.write_frame(Channel::Message, envelope.clone().into_value())
    }
}

impl ReplyTo for FrameWriter {
    fn reply(&mut self, channel: Channel, payload: Value) -> Result<(), DispatchError> {
        self.write_frame(channel, payload)
    }

    fn start_drag(&mut self, file: &Path) -> Result<(), DispatchError> {
        let envelope = Envelope::new(
            START_DRAG_COMMAND,
            json!({ "file": file.to_string_lossy() }),
        );
        self.write_frame(Channel::Message, envelope.into_value())
    }
}

/// Reads one line of at most `limit` bytes, excluding the terminator.
///
/// Returns `Ok(None)` at end of stream. A final line without a trailing
/// newline is still returned.
fn read_frame_line<R: Read>(reader: &mut BufReader<R>, limit: usize) -> io::Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    let budget = u64::try_from(limit.saturating_add(1)).unwrap_or(u64::MAX);
    let read = reader.by_ref().take(budget).read_until(b'\n', &mut line)?;
    if read == 0 {
        return Ok(None);
    }
    if line.last() == Some(&b'\n') {
        line.pop();
    } else if line.len() > limit {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "frame exceeds maximum size",
        ));
    }
    Ok(Some(line))
}
