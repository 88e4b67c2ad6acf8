//! In-memory application with files, directories and projects that journal
//! every mutation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use switchboard_protocol::Hash;

use crate::collaborators::{Application, DirHandle, FileHandle, Project};

/// One mutating call observed by a fake.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub argument: Value,
}

impl Recorded {
    pub fn new(method: &'static str, argument: Value) -> Self {
        Self { method, argument }
    }
}

#[derive(Debug, Clone, Default)]
struct Journal(Arc<Mutex<Vec<Recorded>>>);

impl Journal {
    fn record(&self, method: &'static str, argument: Value) {
        self.0
            .lock()
            .expect("journal lock")
            .push(Recorded::new(method, argument));
    }

    fn entries(&self) -> Vec<Recorded> {
        self.0.lock().expect("journal lock").clone()
    }
}

#[derive(Debug)]
struct FakeFile {
    hash: Hash,
    path: PathBuf,
    content: String,
}

impl FileHandle for FakeFile {
    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn with_content(&self) -> Value {
        json!({"hash": self.hash, "path": self.path, "content": self.content})
    }

    fn search(&self, terms: &[String]) -> Value {
        let matches: Vec<&String> = terms
            .iter()
            .filter(|term| self.content.contains(term.as_str()))
            .collect();
        json!({ "matches": matches })
    }
}

#[derive(Debug)]
struct FakeProject {
    hash: Hash,
    properties: Mutex<Value>,
    journal: Journal,
}

impl Project for FakeProject {
    fn properties(&self) -> Value {
        self.properties.lock().expect("properties lock").clone()
    }

    fn update_properties(&self, properties: Value) {
        self.journal.record("update_properties", properties.clone());
        *self.properties.lock().expect("properties lock") = properties;
    }

    fn build(&self) {
        self.journal.record("build", json!(self.hash));
    }
}

#[derive(Debug)]
struct FakeDir {
    hash: Hash,
    path: PathBuf,
    project: Mutex<Option<Arc<FakeProject>>>,
    journal: Journal,
}

impl FakeDir {
    fn new_project(&self, properties: Value) -> Arc<FakeProject> {
        Arc::new(FakeProject {
            hash: self.hash,
            properties: Mutex::new(properties),
            journal: self.journal.clone(),
        })
    }
}

impl DirHandle for FakeDir {
    fn with_content(&self) -> Value {
        json!({"hash": self.hash, "path": self.path, "children": []})
    }

    fn search(&self, _: &[String]) -> Value {
        json!({ "matches": [] })
    }

    fn make_project(&self) {
        self.journal.record("make_project", json!(self.hash));
        *self.project.lock().expect("project lock") = Some(self.new_project(json!({})));
    }

    fn remove_project(&self) {
        self.journal.record("remove_project", json!(self.hash));
        *self.project.lock().expect("project lock") = None;
    }

    fn project(&self) -> Option<Arc<dyn Project>> {
        self.project
            .lock()
            .expect("project lock")
            .clone()
            .map(|project| project as Arc<dyn Project>)
    }
}

#[derive(Debug, Default)]
struct AppState {
    files: BTreeMap<Hash, Arc<FakeFile>>,
    dirs: BTreeMap<Hash, Arc<FakeDir>>,
    update: Option<Value>,
}

/// Application fake. Clones share state, so the test keeps one to arrange
/// and inspect while the router owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeApplication {
    state: Arc<Mutex<AppState>>,
    journal: Journal,
}

impl FakeApplication {
    fn state(&self) -> std::sync::MutexGuard<'_, AppState> {
        self.state.lock().expect("application lock")
    }

    pub fn add_file(&self, hash: u64, path: &str, content: &str) {
        let file = FakeFile {
            hash: Hash(hash),
            path: PathBuf::from(path),
            content: content.to_owned(),
        };
        self.state().files.insert(Hash(hash), Arc::new(file));
    }

    pub fn add_dir(&self, hash: u64, path: &str, project: Option<Value>) {
        let dir = Arc::new(FakeDir {
            hash: Hash(hash),
            path: PathBuf::from(path),
            project: Mutex::new(None),
            journal: self.journal.clone(),
        });
        if let Some(properties) = project {
            *dir.project.lock().expect("project lock") = Some(dir.new_project(properties));
        }
        self.state().dirs.insert(Hash(hash), dir);
    }

    pub fn offer_update(&self, update: Value) {
        self.state().update = Some(update);
    }

    /// Mutations observed so far, in order.
    pub fn calls(&self) -> Vec<Recorded> {
        self.journal.entries()
    }
}

impl Application for FakeApplication {
    fn find_file(&self, hash: Hash) -> Option<Arc<dyn FileHandle>> {
        let file = self.state().files.get(&hash).cloned()?;
        Some(file)
    }

    fn find_dir(&self, hash: Hash) -> Option<Arc<dyn DirHandle>> {
        let dir = self.state().dirs.get(&hash).cloned()?;
        Some(dir)
    }

    fn find_exact(&self, name: &str) -> Option<Arc<dyn FileHandle>> {
        let file = self
            .state()
            .files
            .values()
            .find(|file| file.path.file_stem().and_then(|stem| stem.to_str()) == Some(name))
            .cloned()?;
        Some(file)
    }

    fn current_file(&self) -> Option<Arc<dyn FileHandle>> {
        None
    }

    fn current_dir(&self) -> Option<Arc<dyn DirHandle>> {
        None
    }

    fn path_dummies(&self) -> Value {
        let state = self.state();
        let files = state.files.values().map(|file| (file.hash, &file.path));
        let dirs = state.dirs.values().map(|dir| (dir.hash, &dir.path));
        files
            .chain(dirs)
            .map(|(hash, path): (Hash, &PathBuf)| json!({"hash": hash, "path": path}))
            .collect()
    }

    fn stats(&self) -> Value {
        json!({ "files": self.state().files.len() })
    }

    fn new_file(&mut self, request: Value) {
        self.journal.record("new_file", request);
    }

    fn new_dir(&mut self, request: Value) {
        self.journal.record("new_dir", request);
    }

    fn new_virtual_dir(&mut self, request: Value) {
        self.journal.record("new_virtual_dir", request);
    }

    fn remove_file(&mut self, hash: Hash) {
        self.journal.record("remove_file", json!(hash));
    }

    fn remove_dir(&mut self, hash: Hash) {
        self.journal.record("remove_dir", json!(hash));
    }

    fn rename_file(&mut self, request: Value) {
        self.journal.record("rename_file", request);
    }

    fn rename_dir(&mut self, request: Value) {
        self.journal.record("rename_dir", request);
    }

    fn request_move(&mut self, request: Value) {
        self.journal.record("request_move", request);
    }

    fn save_file(&mut self, file: Value) {
        self.journal.record("save_file", file);
    }

    fn sort_dir(&mut self, hash: Hash, order: Option<String>) {
        self.journal
            .record("sort_dir", json!({"hash": hash, "order": order}));
    }

    fn select_dir(&mut self, hash: Hash) {
        self.journal.record("select_dir", json!(hash));
    }

    fn export_file(&mut self, request: Value) {
        self.journal.record("export_file", request);
    }

    fn import_file(&mut self) {
        self.journal.record("import_file", Value::Null);
    }

    fn import_lang_file(&mut self) {
        self.journal.record("import_lang_file", Value::Null);
    }

    fn handle_add_roots(&mut self, paths: Vec<PathBuf>) {
        let paths: Vec<&Path> = paths.iter().map(PathBuf::as_path).collect();
        self.journal.record("handle_add_roots", json!(paths));
    }

    fn check_for_update(&mut self) -> Option<Value> {
        self.state().update.clone()
    }

    fn set_modified(&mut self, modified: bool) {
        self.journal.record("set_modified", json!(modified));
    }

    fn open_quicklook(&mut self, hash: Hash) {
        self.journal.record("open_quicklook", json!(hash));
    }
}
