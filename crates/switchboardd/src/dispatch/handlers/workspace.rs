//! File and directory commands delegated to the application.

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Value, json};

use switchboard_protocol::Hash;

use crate::dispatch::errors::DispatchError;
use crate::dispatch::registry::{CommandSpec, HandlerContext, parse_content};

pub(super) static COMMANDS: &[CommandSpec] = &[
    CommandSpec::notify("get-paths", get_paths),
    CommandSpec::notify("get-current-file", get_current_file),
    CommandSpec::notify("get-current-dir", get_current_dir),
    CommandSpec::notify("file-get", file_get),
    CommandSpec::notify("force-open", force_open),
    CommandSpec::notify("file-search", file_search),
    CommandSpec::notify("dir-select", dir_select),
    CommandSpec::notify("file-new", file_new),
    CommandSpec::notify("dir-new", dir_new),
    CommandSpec::notify("dir-new-vd", dir_new_virtual),
    CommandSpec::notify("file-delete", file_delete),
    CommandSpec::notify("dir-delete", dir_delete),
    CommandSpec::notify("file-rename", file_rename),
    CommandSpec::notify("dir-rename", dir_rename),
    CommandSpec::notify("request-move", request_move),
    CommandSpec::notify("file-save", file_save),
    CommandSpec::notify("file-modified", file_modified),
    CommandSpec::notify("mark-clean", mark_clean),
    CommandSpec::notify("dir-sort", dir_sort),
    CommandSpec::notify("file-export", file_export),
    CommandSpec::notify("import-files", import_files),
    CommandSpec::notify("import-lang-file", import_lang_file),
    CommandSpec::notify("roots-add", roots_add),
    CommandSpec::notify("open-quicklook", open_quicklook),
];

#[derive(Debug, Deserialize)]
struct HashArg {
    hash: Hash,
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    hash: Hash,
    #[serde(default)]
    terms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SortArgs {
    hash: Hash,
    #[serde(default, rename = "type")]
    order: Option<String>,
}

fn get_paths(context: &mut HandlerContext<'_>, _: Value) -> Result<Value, DispatchError> {
    let paths = context.collaborators.application.path_dummies();
    context.outbound.send("paths-update", paths);
    Ok(Value::Null)
}

fn get_current_file(context: &mut HandlerContext<'_>, _: Value) -> Result<Value, DispatchError> {
    let file = context
        .collaborators
        .application
        .current_file()
        .ok_or_else(|| DispatchError::unresolved("get-current-file", "current file"))?;
    context.outbound.send("file-update", file.with_content());
    Ok(Value::Null)
}

fn get_current_dir(context: &mut HandlerContext<'_>, _: Value) -> Result<Value, DispatchError> {
    let dir = context
        .collaborators
        .application
        .current_dir()
        .ok_or_else(|| DispatchError::unresolved("get-current-dir", "current directory"))?;
    context.outbound.send("dir-update", dir.with_content());
    Ok(Value::Null)
}

fn file_get(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    let hash: Hash = parse_content("file-get", content)?;
    let file = context
        .collaborators
        .application
        .find_file(hash)
        .ok_or_else(|| DispatchError::unresolved("file-get", hash))?;
    context.outbound.send("file-open", file.with_content());
    Ok(Value::Null)
}

fn force_open(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    let name: String = parse_content("force-open", content)?;
    let file = context
        .collaborators
        .application
        .find_exact(&name)
        .ok_or_else(|| DispatchError::unresolved("force-open", &name))?;
    context.outbound.send("file-open", file.with_content());
    Ok(Value::Null)
}

fn file_search(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    let args: SearchArgs = parse_content("file-search", content)?;
    let file = context
        .collaborators
        .application
        .find_file(args.hash)
        .ok_or_else(|| DispatchError::unresolved("file-search", args.hash))?;
    let result = file.search(&args.terms);
    context.outbound.send(
        "file-search-result",
        json!({ "hash": args.hash, "result": result }),
    );
    Ok(Value::Null)
}

fn dir_select(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    let hash: Hash = parse_content("dir-select", content)?;
    context.collaborators.application.select_dir(hash);
    Ok(Value::Null)
}

fn file_new(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    context.collaborators.application.new_file(content);
    Ok(Value::Null)
}

fn dir_new(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    context.collaborators.application.new_dir(content);
    Ok(Value::Null)
}

fn dir_new_virtual(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    context.collaborators.application.new_virtual_dir(content);
    Ok(Value::Null)
}

fn file_delete(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    let HashArg { hash } = parse_content("file-delete", content)?;
    context.collaborators.application.remove_file(hash);
    Ok(Value::Null)
}

fn dir_delete(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    let HashArg { hash } = parse_content("dir-delete", content)?;
    context.collaborators.application.remove_dir(hash);
    Ok(Value::Null)
}

fn file_rename(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    context.collaborators.application.rename_file(content);
    Ok(Value::Null)
}

fn dir_rename(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    context.collaborators.application.rename_dir(content);
    Ok(Value::Null)
}

fn request_move(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    context.collaborators.application.request_move(content);
    Ok(Value::Null)
}

fn file_save(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    context.collaborators.application.save_file(content);
    Ok(Value::Null)
}

fn file_modified(context: &mut HandlerContext<'_>, _: Value) -> Result<Value, DispatchError> {
    context.collaborators.application.set_modified(true);
    Ok(Value::Null)
}

fn mark_clean(context: &mut HandlerContext<'_>, _: Value) -> Result<Value, DispatchError> {
    context.collaborators.application.set_modified(false);
    Ok(Value::Null)
}

fn dir_sort(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    let SortArgs { hash, order } = parse_content("dir-sort", content)?;
    context.collaborators.application.sort_dir(hash, order);
    Ok(Value::Null)
}

fn file_export(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    context.collaborators.application.export_file(content);
    Ok(Value::Null)
}

fn import_files(context: &mut HandlerContext<'_>, _: Value) -> Result<Value, DispatchError> {
    context.collaborators.application.import_file();
    Ok(Value::Null)
}

fn import_lang_file(context: &mut HandlerContext<'_>, _: Value) -> Result<Value, DispatchError> {
    context.collaborators.application.import_lang_file();
    Ok(Value::Null)
}

fn roots_add(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    let paths: Vec<PathBuf> = parse_content("roots-add", content)?;
    context.collaborators.application.handle_add_roots(paths);
    Ok(Value::Null)
}

fn open_quicklook(context: &mut HandlerContext<'_>, content: Value) -> Result<Value, DispatchError> {
    let hash: Hash = parse_content("open-quicklook", content)?;
    context.collaborators.application.open_quicklook(hash);
    Ok(Value::Null)
}
