use crate::graph::OutputSource;
use crate::output::Output;

/// Whether the module has at least one JS-family output.
///
/// A cheap pre-filter: unlike [`crate::get_js_output`] it accepts any number of
/// JS outputs and never fails.
pub fn is_js_module<M>(module: &M) -> bool
where
    M: OutputSource + ?Sized,
{
    module.outputs().iter().any(is_js_output)
}

pub fn is_js_output(output: &Output) -> bool {
    output.output_type.is_js()
}
