//! Preferences, tags, statistics and update checks.

use serde_json::{Map, Value};

use crate::dispatch::errors::DispatchError;
use crate::dispatch::registry::{CommandSpec, HandlerContext, Mode, parse_content};

const DARK_THEME: &str = "darkTheme";
const SNIPPETS: &str = "snippets";

pub(super) static COMMANDS: &[CommandSpec] = &[
    CommandSpec::notify("update-check", update_check),
    CommandSpec::notify("get-stats", get_stats),
    CommandSpec::notify("get-preferences", get_preferences),
    CommandSpec::notify("update-config", update_config),
    CommandSpec::notify("toggle-theme", toggle_theme),
    CommandSpec::notify("toggle-snippets", toggle_snippets),
    CommandSpec::notify("get-tags", get_tags),
    CommandSpec::notify("update-tags", update_tags),
    CommandSpec::notify_or_call("get-tags-database", get_tags_database),
];

fn update_check(context: &mut HandlerContext<'_>, _: Value) -> Result<Value, DispatchError> {
    if let Some(update) = context.collaborators.application.check_for_update() {
        context.outbound.send("update-available", update);
    }
    Ok(Value::Null)
}

fn get_stats(context: &mut HandlerContext<'_>, _: Value) -> Result<Value, DispatchError> {
    let stats = context.collaborators.application.stats();
    context.outbound.send("stats", stats);
    Ok(Value::Null)
}

fn get_preferences(context: &mut HandlerContext<'_>, _: Value) -> Result<Value, DispatchError> {
    let snapshot = context.collaborators.config.snapshot();
    context.outbound.send("preferences", snapshot);
    Ok(Value::Null)
}

fn update_config(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    let changes: Map<String, Value> = parse_content("update-config", content)?;
    context.collaborators.config.update(changes);
    context.outbound.notify("config-update");
    Ok(Value::Null)
}

fn toggle(context: &mut HandlerContext<'_>, key: &str) -> Result<Value, DispatchError> {
    let current = context.collaborators.config.get(key).as_bool().unwrap_or(false);
    context.collaborators.config.set(key, Value::Bool(!current));
    context.outbound.notify("config-update");
    Ok(Value::Null)
}

fn toggle_theme(context: &mut HandlerContext<'_>, _: Value) -> Result<Value, DispatchError> {
    toggle(context, DARK_THEME)
}

fn toggle_snippets(context: &mut HandlerContext<'_>, _: Value) -> Result<Value, DispatchError> {
    toggle(context, SNIPPETS)
}

fn get_tags(context: &mut HandlerContext<'_>, _: Value) -> Result<Value, DispatchError> {
    let tags = context.collaborators.tags.definitions();
    context.outbound.send("tags", tags);
    Ok(Value::Null)
}

fn update_tags(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    context.collaborators.tags.set_definitions(content);
    let tags = context.collaborators.tags.definitions();
    context.outbound.send("tags-update", tags);
    Ok(Value::Null)
}

fn get_tags_database(context: &mut HandlerContext<'_>, _: Value) -> Result<Value, DispatchError> {
    let database = context.collaborators.tags.database();
    match context.mode {
        Mode::Call => Ok(database),
        _ => {
            context.outbound.send("tags-database", database);
            Ok(Value::Null)
        }
    }
}
