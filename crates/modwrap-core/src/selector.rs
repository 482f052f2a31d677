//! Selection of a module's single compiled-JS output.

use crate::errors::WrapError;
use crate::graph::OutputSource;
use crate::output::{LineCount, Output, OutputType};

/// Borrowed view of a validated JS output.
///
/// Only produced by [`get_js_output`], so the line count is always finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsOutput<'a> {
    output: &'a Output,
    code: &'a str,
    line_count: f64,
}

impl<'a> JsOutput<'a> {
    /// The selected entry, untouched
    pub fn output(&self) -> &'a Output {
        self.output
    }

    pub fn output_type(&self) -> &'a OutputType {
        &self.output.output_type
    }

    pub fn code(&self) -> &'a str {
        self.code
    }

    pub fn line_count(&self) -> f64 {
        self.line_count
    }

    pub fn is_script(&self) -> bool {
        self.output.output_type.is_script()
    }
}

/// Return the single JS-family output of `module`.
///
/// Fails with [`WrapError::WrongOutputCount`] unless exactly one output carries
/// a `js/` tag, and with [`WrapError::InvalidLineCount`] when that output's
/// line count is missing or not finite.
pub fn get_js_output<M>(module: &M) -> Result<JsOutput<'_>, WrapError>
where
    M: OutputSource + ?Sized,
{
    let mut js_outputs = module
        .outputs()
        .iter()
        .filter(|output| output.output_type.is_js());

    let output = match (js_outputs.next(), js_outputs.next()) {
        (Some(output), None) => output,
        (first, second) => {
            let count = first.iter().count() + second.iter().count() + js_outputs.count();
            return Err(WrapError::WrongOutputCount {
                path: module.source_path().map(ToOwned::to_owned),
                count,
            });
        }
    };

    let data = output.js_data();
    let line_count = data
        .map(|d| d.line_count.clone())
        .unwrap_or_else(LineCount::missing);

    match (data, line_count.finite()) {
        (Some(data), Some(line_count)) => Ok(JsOutput {
            output,
            code: &data.code,
            line_count,
        }),
        _ => Err(WrapError::InvalidLineCount {
            path: module.source_path().map(ToOwned::to_owned),
            output_type: output.output_type.as_str().to_string(),
            line_count,
        }),
    }
}
