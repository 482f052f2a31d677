use crate::wrapper::WrapParam;

/// Splices wrap parameters into a module's registration call.
///
/// The result must be valid code in which the parameters follow the
/// factory argument, in the order given, with the rest of the code untouched.
pub trait ParamInjector: Send + Sync {
    fn add_params(&self, code: &str, params: &[WrapParam]) -> String;
}

/// Appends parameters to the last call in the code, which the transformer
/// emits as `__d(function (...) { ... })`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefineCallInjector;

impl ParamInjector for DefineCallInjector {
    fn add_params(&self, code: &str, params: &[WrapParam]) -> String {
        if params.is_empty() {
            return code.to_string();
        }

        let Some(index) = code.rfind(')') else {
            tracing::warn!("No define call found, leaving module code unwrapped");
            return code.to_string();
        };

        let rendered: Vec<String> = params.iter().map(WrapParam::to_js_literal).collect();

        let mut out = String::with_capacity(
            code.len() + rendered.iter().map(|p| p.len() + 1).sum::<usize>(),
        );
        out.push_str(&code[..index]);
        out.push(',');
        out.push_str(&rendered.join(","));
        out.push_str(&code[index..]);
        out
    }
}
