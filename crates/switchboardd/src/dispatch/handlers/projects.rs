//! Project commands. A project is a directory with export properties.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use switchboard_protocol::Hash;

use crate::collaborators::{DirHandle, Project};
use crate::dispatch::errors::DispatchError;
use crate::dispatch::registry::{CommandSpec, HandlerContext, parse_content};

pub(super) static COMMANDS: &[CommandSpec] = &[
    CommandSpec::notify("dir-new-project", new_project),
    CommandSpec::notify("dir-remove-project", remove_project),
    CommandSpec::notify("dir-project-properties", project_properties),
    CommandSpec::notify("update-project-properties", update_properties),
    CommandSpec::notify("dir-project-export", export_project),
];

#[derive(Debug, Deserialize)]
struct PropertiesUpdate {
    hash: Hash,
    properties: Value,
}

fn directory(
    context: &HandlerContext<'_>,
    command: &str,
    hash: Hash,
) -> Result<Arc<dyn DirHandle>, DispatchError> {
    context
        .collaborators
        .application
        .find_dir(hash)
        .ok_or_else(|| DispatchError::unresolved(command, hash))
}

fn project(
    context: &HandlerContext<'_>,
    command: &str,
    hash: Hash,
) -> Result<Arc<dyn Project>, DispatchError> {
    directory(context, command, hash)?
        .project()
        .ok_or_else(|| DispatchError::unresolved(command, format!("project {hash}")))
}

fn new_project(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    let hash: Hash = parse_content("dir-new-project", content)?;
    directory(context, "dir-new-project", hash)?.make_project();
    let paths = context.collaborators.application.path_dummies();
    context.outbound.send("paths-update", paths);
    Ok(Value::Null)
}

fn remove_project(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    let hash: Hash = parse_content("dir-remove-project", content)?;
    directory(context, "dir-remove-project", hash)?.remove_project();
    let paths = context.collaborators.application.path_dummies();
    context.outbound.send("paths-update", paths);
    Ok(Value::Null)
}

fn project_properties(
    context: &mut HandlerContext<'_>,
    content: Value,
) -> Result<Value, DispatchError> {
    let hash: Hash = parse_content("dir-project-properties", content)?;
    let properties = project(context, "dir-project-properties", hash)?.properties();
    context.outbound.send("project-properties", properties);
    Ok(Value::Null)
}

fn update_properties(
    context: &mut HandlerContext<'_>,
    content: Value,
) -> Result<Value, DispatchError> {
    let update: PropertiesUpdate = parse_content("update-project-properties", content)?;
    project(context, "update-project-properties", update.hash)?
        .update_properties(update.properties);
    Ok(Value::Null)
}

fn export_project(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    let hash: Hash = parse_content("dir-project-export", content)?;
    project(context, "dir-project-export", hash)?.build();
    Ok(Value::Null)
}
