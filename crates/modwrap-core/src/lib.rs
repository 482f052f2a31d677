pub mod classifier;
pub mod config;
pub mod errors;
pub mod graph;
pub mod injector;
pub mod module_id;
pub mod output;
pub mod paths;
pub mod processor;
pub mod selector;
pub mod wrapper;

pub use classifier::{is_js_module, is_js_output};
pub use config::{BundleConfig, CliOverrides};
pub use errors::{ConfigError, WrapError};
pub use graph::{Dependency, Module, OutputSet, OutputSource};
pub use injector::{DefineCallInjector, ParamInjector};
pub use module_id::{ModuleId, ModuleIdAllocator, SequentialIdAllocator};
pub use output::{count_lines, JsOutputData, LineCount, Output, OutputData, OutputType};
pub use paths::{normalize_path, relative_path, resolve_path};
pub use processor::{par_process_modules, process_modules};
pub use selector::{get_js_output, JsOutput};
pub use wrapper::{build_wrap_params, wrap_module, WrapOptions, WrapParam};
