//! Interfaces of the backend subsystems the router delegates to.
//!
//! The router owns no domain behaviour. Every command ends in exactly one of
//! these traits, and the implementations (file tree, preference store,
//! citation processor and so on) live outside this crate. They are injected
//! once, at construction, through [`Collaborators`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};

use switchboard_protocol::{Channel, Hash};

use crate::dispatch::DispatchError;

/// Handle to a file known to the backend.
pub trait FileHandle: Send + Sync {
    /// Absolute path on disk.
    fn path(&self) -> PathBuf;
    /// Metadata plus full text, as sent to the frontend.
    fn with_content(&self) -> Value;
    /// Runs a full-text search and returns the backend's result object.
    fn search(&self, terms: &[String]) -> Value;
}

/// Handle to a directory known to the backend.
pub trait DirHandle: Send + Sync {
    /// Directory metadata including its children.
    fn with_content(&self) -> Value;
    /// Runs a full-text search over the directory.
    fn search(&self, terms: &[String]) -> Value;
    /// Turns the directory into a project.
    fn make_project(&self);
    /// Removes the directory's project.
    fn remove_project(&self);
    /// The directory's project, if it is one.
    fn project(&self) -> Option<Arc<dyn Project>>;
}

/// A directory promoted to a project.
pub trait Project: Send + Sync {
    /// Current project properties.
    fn properties(&self) -> Value;
    /// Replaces the given project properties.
    fn update_properties(&self, properties: Value);
    /// Exports the project.
    fn build(&self);
}

/// The backend application object.
///
/// Request payloads the router does not need to inspect are passed through
/// as raw JSON; interpreting them is the application's business.
pub trait Application: Send {
    fn find_file(&self, hash: Hash) -> Option<Arc<dyn FileHandle>>;
    fn find_dir(&self, hash: Hash) -> Option<Arc<dyn DirHandle>>;
    /// Finds a file by exact name (without extension).
    fn find_exact(&self, name: &str) -> Option<Arc<dyn FileHandle>>;
    fn current_file(&self) -> Option<Arc<dyn FileHandle>>;
    fn current_dir(&self) -> Option<Arc<dyn DirHandle>>;
    /// Lightweight copy of the whole directory tree for the sidebar.
    fn path_dummies(&self) -> Value;
    fn stats(&self) -> Value;

    fn new_file(&mut self, request: Value);
    fn new_dir(&mut self, request: Value);
    fn new_virtual_dir(&mut self, request: Value);
    fn remove_file(&mut self, hash: Hash);
    fn remove_dir(&mut self, hash: Hash);
    fn rename_file(&mut self, request: Value);
    fn rename_dir(&mut self, request: Value);
    fn request_move(&mut self, request: Value);
    fn save_file(&mut self, file: Value);
    fn sort_dir(&mut self, hash: Hash, order: Option<String>);
    fn select_dir(&mut self, hash: Hash);
    fn export_file(&mut self, request: Value);
    fn import_file(&mut self);
    fn import_lang_file(&mut self);
    fn handle_add_roots(&mut self, paths: Vec<PathBuf>);
    /// Returns update details when a newer release exists.
    fn check_for_update(&mut self) -> Option<Value>;
    fn set_modified(&mut self, modified: bool);
    fn open_quicklook(&mut self, hash: Hash);
}

/// Application preferences served over the `config` channel.
pub trait ConfigStore: Send {
    /// Value for `key`; unknown keys yield the store's default.
    fn get(&self, key: &str) -> Value;
    fn set(&mut self, key: &str, value: Value);
    /// Merges several keys at once.
    fn update(&mut self, changes: Map<String, Value>);
    /// Every preference, for the preferences dialog.
    fn snapshot(&self) -> Value;
}

/// Coloured tag definitions and the database of tags seen in files.
pub trait TagStore: Send {
    fn definitions(&self) -> Value;
    fn set_definitions(&mut self, definitions: Value);
    /// Mapping from tag name to usage information.
    fn database(&self) -> Value;
}

/// Spell-check provider. Loaded asynchronously after start-up.
pub trait Dictionary: Send {
    fn check(&self, term: &str) -> bool;
    fn suggest(&self, term: &str) -> Vec<String>;
}

/// Citation processor. Loaded once a library has been read.
pub trait CitationEngine: Send {
    /// Formatted citation for the given item ids.
    fn citation(&mut self, ids: &[String]) -> Value;
    /// Refreshes the given items and returns the engine's acknowledgement.
    fn update_items(&mut self, ids: &[String]) -> Value;
}

/// A top-level frontend window.
pub trait Window: Send + Sync {
    fn toggle_maximise(&self);
    fn minimise(&self);
    fn close(&self);
}

/// Window manager of the backend process.
pub trait WindowManager: Send {
    /// Window that currently has focus, if any.
    fn focused(&self) -> Option<Arc<dyn Window>>;
    /// Opens a detached viewer window; returns whether it was created.
    fn open_standalone(&mut self, request: Value) -> bool;
}

/// Filter entry of a file picker, e.g. `{name: "Markdown", extensions: ["md"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileFilter {
    pub name: String,
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Parameters of a file picker dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilePickerRequest {
    #[serde(default)]
    pub filters: Vec<FileFilter>,
    /// Allow selecting several files.
    #[serde(default, rename = "multiSel")]
    pub multi_select: bool,
}

/// Native dialogs.
pub trait FileDialogs: Send {
    /// Shows a picker; `None` means the user cancelled.
    fn pick_files(&mut self, request: &FilePickerRequest) -> Option<Vec<PathBuf>>;
}

/// Capability bound to the connection a message arrived on.
///
/// Replies to correlated calls and synchronous queries, and the two
/// intercepted commands, must reach that connection rather than whichever
/// frontend `send` currently targets.
pub trait ReplyTo {
    /// Writes `payload` on `channel` back to the originating connection.
    fn reply(&mut self, channel: Channel, payload: Value) -> Result<(), DispatchError>;
    /// Starts a platform drag of `file` from the originating window.
    fn start_drag(&mut self, file: &Path) -> Result<(), DispatchError>;
}

/// Every collaborator the router talks to, injected at construction.
pub struct Collaborators {
    pub application: Box<dyn Application>,
    pub config: Box<dyn ConfigStore>,
    pub tags: Box<dyn TagStore>,
    pub windows: Box<dyn WindowManager>,
    pub dialogs: Box<dyn FileDialogs>,
    /// Absent until the dictionary has loaded.
    pub dictionary: Option<Box<dyn Dictionary>>,
    /// Absent until a citation library has loaded.
    pub citations: Option<Box<dyn CitationEngine>>,
}

impl Collaborators {
    /// Bundles the mandatory collaborators. Dictionary and citation engine
    /// start out missing.
    pub fn new(
        application: Box<dyn Application>,
        config: Box<dyn ConfigStore>,
        tags: Box<dyn TagStore>,
        windows: Box<dyn WindowManager>,
        dialogs: Box<dyn FileDialogs>,
    ) -> Self {
        Self {
            application,
            config,
            tags,
            windows,
            dialogs,
            dictionary: None,
            citations: None,
        }
    }

    #[must_use]
    pub fn with_dictionary(mut self, dictionary: Box<dyn Dictionary>) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    #[must_use]
    pub fn with_citation_engine(mut self, engine: Box<dyn CitationEngine>) -> Self {
        self.citations = Some(engine);
        self
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Collaborators")
            .field("dictionary_ready", &self.dictionary.is_some())
            .field("citations_ready", &self.citations.is_some())
            .finish_non_exhaustive()
    }
}
