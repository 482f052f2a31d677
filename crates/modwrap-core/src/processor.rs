//! Graph-level wrapping: filter the JS modules of a graph and wrap each one.

use crate::classifier::is_js_module;
use crate::errors::WrapError;
use crate::graph::Module;
use crate::wrapper::{wrap_module, WrapOptions};
use rayon::prelude::*;
use tracing::debug;

/// Wrap every JS module accepted by `filter`, in input order.
///
/// The first selection failure aborts the whole batch.
pub fn process_modules<'m, I, F>(
    modules: I,
    options: &WrapOptions<'_>,
    filter: F,
) -> Result<Vec<(&'m Module, String)>, WrapError>
where
    I: IntoIterator<Item = &'m Module>,
    F: Fn(&Module) -> bool,
{
    let mut skipped = 0usize;
    let mut wrapped = Vec::new();

    for module in modules {
        if !is_js_module(module) || !filter(module) {
            skipped += 1;
            continue;
        }
        wrapped.push((module, wrap_module(module, options)?));
    }

    debug!("Wrapped {} module(s), skipped {}", wrapped.len(), skipped);
    Ok(wrapped)
}

/// Parallel [`process_modules`]. The result keeps input order.
///
/// Ids from a first-seen allocator depend on scheduling here; assign them in
/// graph order beforehand when stable ids matter.
pub fn par_process_modules<'m, F>(
    modules: &'m [Module],
    options: &WrapOptions<'_>,
    filter: F,
) -> Result<Vec<(&'m Module, String)>, WrapError>
where
    F: Fn(&Module) -> bool + Sync,
{
    let wrapped = modules
        .par_iter()
        .filter(|module| is_js_module(*module) && filter(*module))
        .map(|module| wrap_module(module, options).map(|code| (module, code)))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Wrapped {} module(s) in parallel, skipped {}",
        wrapped.len(),
        modules.len() - wrapped.len()
    );
    Ok(wrapped)
}
