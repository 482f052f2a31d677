//! Wrapping of a module's JS output for the bundle registry.
//!
//! Regular modules get their id, the ids of their dependencies and, in
//! development builds, a readable name injected into their define call:
//!
//! ```text
//! __d(function (...) { ... },0,[1],"src/foo.js");
//! ```
//!
//! Script outputs run directly at load time and are returned as-is.

use crate::errors::WrapError;
use crate::graph::Module;
use crate::injector::{DefineCallInjector, ParamInjector};
use crate::module_id::{ModuleId, ModuleIdAllocator};
use crate::paths::relative_path;
use crate::selector::get_js_output;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::trace;

/// Parameter injected into a define call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WrapParam {
    ModuleId(ModuleId),
    DependencyIds(Vec<ModuleId>),
    /// Path relative to the project root, exposed as `module.verboseName`
    VerboseName(String),
}

impl WrapParam {
    /// Render as a JS literal
    pub fn to_js_literal(&self) -> String {
        fn id_value(id: &ModuleId) -> Value {
            match id {
                ModuleId::Number(n) => Value::from(*n),
                ModuleId::Name(name) => Value::from(name.as_str()),
            }
        }

        let value = match self {
            WrapParam::ModuleId(id) => id_value(id),
            WrapParam::DependencyIds(ids) => Value::Array(ids.iter().map(id_value).collect()),
            WrapParam::VerboseName(name) => Value::from(name.as_str()),
        };
        value.to_string()
    }
}

/// Settings for [`wrap_module`]
#[derive(Clone, Copy)]
pub struct WrapOptions<'a> {
    pub create_module_id: &'a dyn ModuleIdAllocator,
    pub dev: bool,
    pub project_root: &'a Path,
    pub injector: &'a dyn ParamInjector,
}

impl<'a> WrapOptions<'a> {
    pub fn new(create_module_id: &'a dyn ModuleIdAllocator, project_root: &'a Path) -> Self {
        Self {
            create_module_id,
            dev: false,
            project_root,
            injector: &DefineCallInjector,
        }
    }

    pub fn with_dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }

    pub fn with_injector(mut self, injector: &'a dyn ParamInjector) -> Self {
        self.injector = injector;
        self
    }
}

impl std::fmt::Debug for WrapOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrapOptions")
            .field("dev", &self.dev)
            .field("project_root", &self.project_root)
            .finish_non_exhaustive()
    }
}

/// Produce the code to register for `module`.
///
/// Selection failures abort the wrap; nothing partial is returned.
pub fn wrap_module(module: &Module, options: &WrapOptions<'_>) -> Result<String, WrapError> {
    let output = get_js_output(module)?;

    if output.is_script() {
        return Ok(output.code().to_string());
    }

    let params = build_wrap_params(module, options);
    trace!(
        "Wrapping {} as {}",
        module.path.display(),
        params[0].to_js_literal()
    );

    Ok(options.injector.add_params(output.code(), &params))
}

/// Ordered define-call parameters: module id, dependency ids, then the
/// verbose name when `dev` is set.
pub fn build_wrap_params(module: &Module, options: &WrapOptions<'_>) -> Vec<WrapParam> {
    let allocator = options.create_module_id;

    let module_id = allocator.create_module_id(&module.path);
    let dependency_ids = module
        .dependencies
        .values()
        .map(|dependency| allocator.create_module_id(&dependency.absolute_path))
        .collect();

    let mut params = vec![
        WrapParam::ModuleId(module_id),
        WrapParam::DependencyIds(dependency_ids),
    ];

    if options.dev {
        params.push(WrapParam::VerboseName(relative_path(
            options.project_root,
            &module.path,
        )));
    }

    params
}
