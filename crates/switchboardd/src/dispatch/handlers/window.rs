//! Window lifecycle commands, reachable both as notifications and as calls.

use serde_json::Value;

use crate::collaborators::Window;
use crate::dispatch::errors::DispatchError;
use crate::dispatch::registry::{CommandSpec, HandlerContext};

pub(super) static COMMANDS: &[CommandSpec] = &[
    CommandSpec::notify_or_call("win-maximise", toggle_maximise),
    CommandSpec::notify_or_call("win-minimise", minimise),
    CommandSpec::notify_or_call("win-close", close),
];

fn with_focused(
    context: &HandlerContext<'_>,
    command: &str,
    action: impl FnOnce(&dyn Window),
) -> Result<Value, DispatchError> {
    let window = context
        .collaborators
        .windows
        .focused()
        .ok_or_else(|| DispatchError::no_active_window(command))?;
    action(window.as_ref());
    Ok(Value::Null)
}

fn toggle_maximise(context: &mut HandlerContext<'_>, _: Value) -> Result<Value, DispatchError> {
    with_focused(context, "win-maximise", |window| window.toggle_maximise())
}

fn minimise(context: &mut HandlerContext<'_>, _: Value) -> Result<Value, DispatchError> {
    with_focused(context, "win-minimise", |window| window.minimise())
}

fn close(context: &mut HandlerContext<'_>, _: Value) -> Result<Value, DispatchError> {
    with_focused(context, "win-close", |window| window.close())
}
