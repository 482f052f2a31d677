//! Mock implementations for testing

use modwrap_core::{ModuleId, ModuleIdAllocator, ParamInjector, WrapParam};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Allocator backed by a fixed table that records every lookup
#[derive(Debug, Default)]
pub struct TableAllocator {
    ids: HashMap<PathBuf, ModuleId>,
    calls: Mutex<Vec<PathBuf>>,
}

impl TableAllocator {
    pub fn new<P: Into<PathBuf>>(entries: impl IntoIterator<Item = (P, ModuleId)>) -> Self {
        Self {
            ids: entries.into_iter().map(|(p, id)| (p.into(), id)).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Paths looked up so far, in call order
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl ModuleIdAllocator for TableAllocator {
    fn create_module_id(&self, path: &Path) -> ModuleId {
        self.calls.lock().unwrap().push(path.to_path_buf());
        self.ids
            .get(path)
            .cloned()
            .unwrap_or_else(|| panic!("no id registered for {}", path.display()))
    }
}

/// Injector that records the parameters it receives and returns a marker
#[derive(Debug, Default)]
pub struct RecordingInjector {
    received: Mutex<Vec<(String, Vec<WrapParam>)>>,
}

impl RecordingInjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<(String, Vec<WrapParam>)> {
        self.received.lock().unwrap().clone()
    }
}

impl ParamInjector for RecordingInjector {
    fn add_params(&self, code: &str, params: &[WrapParam]) -> String {
        self.received
            .lock()
            .unwrap()
            .push((code.to_string(), params.to_vec()));
        format!("/* wrapped */{}", code)
    }
}
