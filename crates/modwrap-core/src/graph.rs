//! Module records as produced by the graph builder.

use crate::output::Output;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Edge from a module to one of its dependencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub absolute_path: PathBuf,

    /// Transformer-specific metadata, e.g. the original import name
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl Dependency {
    pub fn new(absolute_path: impl Into<PathBuf>) -> Self {
        Self {
            absolute_path: absolute_path.into(),
            data: Value::Null,
        }
    }
}

/// A unit of source in the dependency graph, identified by its absolute path.
///
/// Dependencies are kept in insertion order: the order of the injected
/// dependency ids follows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub path: PathBuf,

    #[serde(default)]
    pub output: Vec<Output>,

    #[serde(default)]
    pub dependencies: IndexMap<String, Dependency>,
}

impl Module {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            output: Vec::new(),
            dependencies: IndexMap::new(),
        }
    }

    pub fn with_output(mut self, output: Output) -> Self {
        self.output.push(output);
        self
    }

    /// Add a dependency keyed by the specifier it was imported with
    pub fn with_dependency(
        mut self,
        key: impl Into<String>,
        absolute_path: impl Into<PathBuf>,
    ) -> Self {
        self.dependencies
            .insert(key.into(), Dependency::new(absolute_path));
        self
    }
}

/// Anything exposing an output sequence and, optionally, the path it belongs to
pub trait OutputSource {
    fn outputs(&self) -> &[Output];

    fn source_path(&self) -> Option<&Path>;
}

impl OutputSource for Module {
    fn outputs(&self) -> &[Output] {
        &self.output
    }

    fn source_path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// Bare output list, for callers that validate outputs before a module exists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputSet {
    pub output: Vec<Output>,
    pub path: Option<PathBuf>,
}

impl OutputSet {
    pub fn new(output: Vec<Output>) -> Self {
        Self { output, path: None }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl OutputSource for OutputSet {
    fn outputs(&self) -> &[Output] {
        &self.output
    }

    fn source_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_order_preserved() {
        let module = Module::new("/root/a.js")
            .with_dependency("./z", "/root/z.js")
            .with_dependency("./b", "/root/b.js")
            .with_dependency("./m", "/root/m.js");

        let paths: Vec<_> = module
            .dependencies
            .values()
            .map(|d| d.absolute_path.to_str().unwrap())
            .collect();
        assert_eq!(paths, vec!["/root/z.js", "/root/b.js", "/root/m.js"]);
    }

    #[test]
    fn test_deserialize_module_keeps_dependency_order() {
        let json = r#"{
            "path": "/root/src/foo.js",
            "output": [{"type": "js/module", "data": {"code": "__d(function() {});", "lineCount": 1}}],
            "dependencies": {
                "./zeta": {"absolutePath": "/root/src/zeta.js"},
                "./alpha": {"absolutePath": "/root/src/alpha.js", "data": {"isAsync": false}}
            }
        }"#;
        let module: Module = serde_json::from_str(json).unwrap();

        let keys: Vec<_> = module.dependencies.keys().cloned().collect();
        assert_eq!(keys, vec!["./zeta", "./alpha"]);
        assert_eq!(module.output.len(), 1);
    }

    #[test]
    fn test_output_set_path_is_optional() {
        let set = OutputSet::new(vec![]);
        assert!(set.source_path().is_none());

        let set = set.with_path("/root/x.js");
        assert_eq!(set.source_path(), Some(Path::new("/root/x.js")));
    }
}
