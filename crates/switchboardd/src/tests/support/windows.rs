//! Window manager and dialog fakes.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::collaborators::{FileDialogs, FilePickerRequest, Window, WindowManager};

#[derive(Debug)]
struct RecordingWindow {
    actions: Arc<Mutex<Vec<String>>>,
}

impl RecordingWindow {
    fn record(&self, action: &str) {
        self.actions
            .lock()
            .expect("actions lock")
            .push(action.to_owned());
    }
}

impl Window for RecordingWindow {
    fn toggle_maximise(&self) {
        self.record("toggle_maximise");
    }

    fn minimise(&self) {
        self.record("minimise");
    }

    fn close(&self) {
        self.record("close");
    }
}

/// Window manager whose single window can be given focus.
#[derive(Debug, Clone, Default)]
pub struct RecordingWindows {
    focused: Arc<Mutex<bool>>,
    actions: Arc<Mutex<Vec<String>>>,
    standalone: Arc<Mutex<Vec<Value>>>,
}

impl RecordingWindows {
    pub fn focus(&self) {
        *self.focused.lock().expect("focus lock") = true;
    }

    /// Actions performed on the focused window, in order.
    pub fn actions(&self) -> Vec<String> {
        self.actions.lock().expect("actions lock").clone()
    }

    pub fn standalone_requests(&self) -> Vec<Value> {
        self.standalone.lock().expect("standalone lock").clone()
    }
}

impl WindowManager for RecordingWindows {
    fn focused(&self) -> Option<Arc<dyn Window>> {
        if !*self.focused.lock().expect("focus lock") {
            return None;
        }
        Some(Arc::new(RecordingWindow {
            actions: Arc::clone(&self.actions),
        }))
    }

    fn open_standalone(&mut self, request: Value) -> bool {
        self.standalone
            .lock()
            .expect("standalone lock")
            .push(request);
        true
    }
}

/// File picker that returns a scripted selection, or cancels when none is
/// set.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialogs {
    selection: Arc<Mutex<Option<Vec<PathBuf>>>>,
    requests: Arc<Mutex<Vec<FilePickerRequest>>>,
}

impl ScriptedDialogs {
    pub fn select(&self, paths: &[&str]) {
        let paths = paths.iter().map(PathBuf::from).collect();
        *self.selection.lock().expect("selection lock") = Some(paths);
    }

    pub fn requests(&self) -> Vec<FilePickerRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl FileDialogs for ScriptedDialogs {
    fn pick_files(&mut self, request: &FilePickerRequest) -> Option<Vec<PathBuf>> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        self.selection.lock().expect("selection lock").clone()
    }
}
