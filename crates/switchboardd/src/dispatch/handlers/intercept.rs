//! Commands handled before classification.
//!
//! Both need the connection the message arrived on: dragging starts from the
//! originating window, and the quicklook content goes back to that window
//! rather than to the main frontend.

use serde::Deserialize;
use serde_json::Value;

use switchboard_protocol::{Channel, Envelope, Hash};

use crate::dispatch::errors::DispatchError;
use crate::dispatch::registry::{CommandSpec, HandlerContext, parse_content};

pub(super) static COMMANDS: &[CommandSpec] = &[
    CommandSpec::intercept("file-drag-start", drag_start),
    CommandSpec::intercept("file-get-quicklook", quicklook),
];

#[derive(Debug, Deserialize)]
struct DragRequest {
    hash: Hash,
}

fn drag_start(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    let DragRequest { hash } = parse_content("file-drag-start", content)?;
    let file = context
        .collaborators
        .application
        .find_file(hash)
        .ok_or_else(|| DispatchError::unresolved("file-drag-start", hash))?;
    context.reply_to.start_drag(&file.path())?;
    Ok(Value::Null)
}

fn quicklook(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    let hash: Hash = parse_content("file-get-quicklook", content)?;
    let file = context
        .collaborators
        .application
        .find_file(hash)
        .ok_or_else(|| DispatchError::unresolved("file-get-quicklook", hash))?;
    let envelope = Envelope::new("file-quicklook", file.with_content());
    context.reply_to.reply(Channel::Message, envelope.into_value())?;
    Ok(Value::Null)
}
