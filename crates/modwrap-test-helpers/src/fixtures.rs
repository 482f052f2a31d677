//! Test fixtures - module records and graphs for testing

use modwrap_core::{JsOutputData, LineCount, Module, Output, OutputData};
use serde_json::json;

/// Define call as emitted by the transformer
pub const DEFINE_CALL: &str = "__d(function (global, _$$_REQUIRE, _$$_IMPORT_DEFAULT, module, exports) {\n  module.exports = 42;\n});";

/// Global setup code that must never be wrapped
pub const POLYFILL: &str = "(function (global) {\n  global.__DEV__ = true;\n})(typeof globalThis !== 'undefined' ? globalThis : this);";

/// `/root/src/foo.js` depending on `/root/src/bar.js`
pub fn foo_module() -> Module {
    Module::new("/root/src/foo.js")
        .with_output(Output::js_module(DEFINE_CALL))
        .with_dependency("./bar", "/root/src/bar.js")
}

pub fn bar_module() -> Module {
    Module::new("/root/src/bar.js").with_output(Output::js_module(DEFINE_CALL))
}

pub fn polyfill_module() -> Module {
    Module::new("/root/node_modules/polyfills/console.js")
        .with_output(Output::js_script(POLYFILL))
}

pub fn asset_module() -> Module {
    Module::new("/root/assets/logo.png").with_output(Output::asset(
        "asset/png",
        json!({"width": 64, "height": 64, "hash": "0f3a"}),
    ))
}

/// JS module whose single output carries the given line count
pub fn module_with_line_count(line_count: LineCount) -> Module {
    Module::new("/root/src/broken.js").with_output(Output::new(
        "js/module",
        OutputData::Js(JsOutputData::new(DEFINE_CALL, line_count)),
    ))
}

/// Polyfill, entry point, its dependency and an asset, in graph order
pub fn small_graph() -> Vec<Module> {
    vec![
        polyfill_module(),
        foo_module().with_dependency("../assets/logo.png", "/root/assets/logo.png"),
        bar_module(),
        asset_module(),
    ]
}

/// `small_graph` serialized the way the graph builder writes it
pub fn small_graph_json() -> String {
    serde_json::to_string_pretty(&small_graph()).expect("small graph serializes")
}
