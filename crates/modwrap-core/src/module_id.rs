//! Module id allocation.
//!
//! Ids replace paths for cross-module references inside a bundle. The wrapper
//! only consumes ids through [`ModuleIdAllocator`]; [`SequentialIdAllocator`]
//! is the default scheme.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Identifier of a module in the bundle registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleId {
    Number(u64),
    Name(String),
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleId::Number(id) => write!(f, "{}", id),
            ModuleId::Name(name) => f.write_str(name),
        }
    }
}

impl From<u64> for ModuleId {
    fn from(id: u64) -> Self {
        ModuleId::Number(id)
    }
}

impl From<&str> for ModuleId {
    fn from(name: &str) -> Self {
        ModuleId::Name(name.to_string())
    }
}

impl From<String> for ModuleId {
    fn from(name: String) -> Self {
        ModuleId::Name(name)
    }
}

/// Maps an absolute module path to its id.
///
/// Implementations must be deterministic within one bundling run and hand out
/// distinct ids for distinct paths.
pub trait ModuleIdAllocator: Send + Sync {
    fn create_module_id(&self, path: &Path) -> ModuleId;
}

impl<F> ModuleIdAllocator for F
where
    F: Fn(&Path) -> ModuleId + Send + Sync,
{
    fn create_module_id(&self, path: &Path) -> ModuleId {
        self(path)
    }
}

#[derive(Debug, Default)]
struct Assigned {
    ids: FxHashMap<PathBuf, u64>,
    next: u64,
}

/// Numbers modules in the order they are first seen, starting at 0
#[derive(Debug, Default)]
pub struct SequentialIdAllocator {
    assigned: Mutex<Assigned>,
}

impl SequentialIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids handed out so far
    pub fn len(&self) -> usize {
        self.lock().ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Assigned> {
        // A panic while holding the lock cannot leave the map half-updated
        self.assigned
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ModuleIdAllocator for SequentialIdAllocator {
    fn create_module_id(&self, path: &Path) -> ModuleId {
        let mut assigned = self.lock();
        if let Some(id) = assigned.ids.get(path) {
            return ModuleId::Number(*id);
        }
        let id = assigned.next;
        assigned.next += 1;
        assigned.ids.insert(path.to_path_buf(), id);
        ModuleId::Number(id)
    }
}
