//! Callback-only commands: native file picker and standalone viewers.

use serde_json::Value;

use crate::collaborators::FilePickerRequest;
use crate::dispatch::errors::DispatchError;
use crate::dispatch::registry::{CommandSpec, HandlerContext, parse_content};

pub(super) static COMMANDS: &[CommandSpec] = &[
    CommandSpec::call("request-files", request_files),
    CommandSpec::call("make-standalone", make_standalone),
];

/// Returns the chosen paths, or `null` when the dialog was cancelled.
fn request_files(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    let request: FilePickerRequest = parse_content("request-files", content)?;
    let Some(paths) = context.collaborators.dialogs.pick_files(&request) else {
        return Ok(Value::Null);
    };
    let paths = paths
        .into_iter()
        .map(|path| Value::String(path.to_string_lossy().into_owned()))
        .collect();
    Ok(Value::Array(paths))
}

fn make_standalone(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    let opened = context.collaborators.windows.open_standalone(content);
    Ok(Value::Bool(opened))
}
