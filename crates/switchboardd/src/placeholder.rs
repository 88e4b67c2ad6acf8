//! Stand-in collaborators wired by the binary until real subsystems are
//! plugged in.
//!
//! Preferences and tags are kept in memory. The application knows no files,
//! no window ever has focus and every dialog is cancelled.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{Map, Value, json};
use tracing::debug;

use switchboard_protocol::Hash;

use crate::collaborators::{
    Application, Collaborators, ConfigStore, DirHandle, FileDialogs, FileHandle,
    FilePickerRequest, TagStore, Window, WindowManager,
};

const PLACEHOLDER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::placeholder");

/// Preference store backed by a JSON object. Unknown keys read as `null`.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    values: Map<String, Value>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with initial values.
    #[must_use]
    pub fn with_values(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, key: &str) -> Value {
        self.values.get(key).cloned().unwrap_or(Value::Null)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_owned(), value);
    }

    fn update(&mut self, changes: Map<String, Value>) {
        self.values.extend(changes);
    }

    fn snapshot(&self) -> Value {
        Value::Object(self.values.clone())
    }
}

/// Tag store holding definitions and a fixed database in memory.
#[derive(Debug, Clone)]
pub struct MemoryTagStore {
    definitions: Value,
    database: Value,
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_database(mut self, database: Value) -> Self {
        self.database = database;
        self
    }
}

impl Default for MemoryTagStore {
    fn default() -> Self {
        Self {
            definitions: json!([]),
            database: json!({}),
        }
    }
}

impl TagStore for MemoryTagStore {
    fn definitions(&self) -> Value {
        self.definitions.clone()
    }

    fn set_definitions(&mut self, definitions: Value) {
        self.definitions = definitions;
    }

    fn database(&self) -> Value {
        self.database.clone()
    }
}

/// Application without any loaded roots. Requests are logged and ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyApplication;

impl EmptyApplication {
    fn ignore(action: &'static str) {
        debug!(target: PLACEHOLDER_TARGET, action, "ignored by placeholder application");
    }
}

impl Application for EmptyApplication {
    fn find_file(&self, _: Hash) -> Option<Arc<dyn FileHandle>> {
        None
    }

    fn find_dir(&self, _: Hash) -> Option<Arc<dyn DirHandle>> {
        None
    }

    fn find_exact(&self, _: &str) -> Option<Arc<dyn FileHandle>> {
        None
    }

    fn current_file(&self) -> Option<Arc<dyn FileHandle>> {
        None
    }

    fn current_dir(&self) -> Option<Arc<dyn DirHandle>> {
        None
    }

    fn path_dummies(&self) -> Value {
        json!([])
    }

    fn stats(&self) -> Value {
        json!({})
    }

    fn new_file(&mut self, _: Value) {
        Self::ignore("new_file");
    }

    fn new_dir(&mut self, _: Value) {
        Self::ignore("new_dir");
    }

    fn new_virtual_dir(&mut self, _: Value) {
        Self::ignore("new_virtual_dir");
    }

    fn remove_file(&mut self, _: Hash) {
        Self::ignore("remove_file");
    }

    fn remove_dir(&mut self, _: Hash) {
        Self::ignore("remove_dir");
    }

    fn rename_file(&mut self, _: Value) {
        Self::ignore("rename_file");
    }

    fn rename_dir(&mut self, _: Value) {
        Self::ignore("rename_dir");
    }

    fn request_move(&mut self, _: Value) {
        Self::ignore("request_move");
    }

    fn save_file(&mut self, _: Value) {
        Self::ignore("save_file");
    }

    fn sort_dir(&mut self, _: Hash, _: Option<String>) {
        Self::ignore("sort_dir");
    }

    fn select_dir(&mut self, _: Hash) {
        Self::ignore("select_dir");
    }

    fn export_file(&mut self, _: Value) {
        Self::ignore("export_file");
    }

    fn import_file(&mut self) {
        Self::ignore("import_file");
    }

    fn import_lang_file(&mut self) {
        Self::ignore("import_lang_file");
    }

    fn handle_add_roots(&mut self, _: Vec<PathBuf>) {
        Self::ignore("handle_add_roots");
    }

    fn check_for_update(&mut self) -> Option<Value> {
        None
    }

    fn set_modified(&mut self, _: bool) {}

    fn open_quicklook(&mut self, _: Hash) {
        Self::ignore("open_quicklook");
    }
}

/// Window manager with no windows.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoWindows;

impl WindowManager for NoWindows {
    fn focused(&self) -> Option<Arc<dyn Window>> {
        None
    }

    fn open_standalone(&mut self, _: Value) -> bool {
        false
    }
}

/// Dialogs that behave as if the user always pressed cancel.
#[derive(Debug, Default, Clone, Copy)]
pub struct CancellingDialogs;

impl FileDialogs for CancellingDialogs {
    fn pick_files(&mut self, _: &FilePickerRequest) -> Option<Vec<PathBuf>> {
        None
    }
}

/// Collaborators built entirely from placeholders.
pub fn placeholder_collaborators() -> Collaborators {
    Collaborators::new(
        Box::new(EmptyApplication),
        Box::new(MemoryConfigStore::new()),
        Box::new(MemoryTagStore::new()),
        Box::new(NoWindows),
        Box::new(CancellingDialogs),
    )
}
