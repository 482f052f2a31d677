//! Transform outputs attached to a module.
//!
//! Upstream compilation produces one [`Output`] per output kind. Each output is
//! tagged by a namespaced type string such as `js/module`, `js/script` or
//! `asset/png`. The tag is modelled as [`OutputType`], which keeps the raw tag
//! around so unrecognized kinds survive a round trip through the graph.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Prefix shared by every compiled-JS output tag
pub const JS_PREFIX: &str = "js/";

/// Prefix of JS outputs that execute directly at load time
pub const SCRIPT_PREFIX: &str = "js/script";

/// Prefix of asset output tags
pub const ASSET_PREFIX: &str = "asset";

/// Type tag of a transform output
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutputType {
    /// `js/module`: regular module registered through a define call
    JsModule,
    /// `js/script`: global code such as polyfills and the module system itself
    JsScript,
    /// Any other `js/...` tag, e.g. `js/module/asset` or `js/script/virtual`
    JsOther(String),
    /// `asset` or `asset/...`
    Asset(String),
    /// Tags outside the known families
    Other(String),
}

impl OutputType {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "js/module" => OutputType::JsModule,
            "js/script" => OutputType::JsScript,
            _ if tag.starts_with(JS_PREFIX) => OutputType::JsOther(tag.to_string()),
            _ if tag.starts_with(ASSET_PREFIX) => OutputType::Asset(tag.to_string()),
            _ => OutputType::Other(tag.to_string()),
        }
    }

    /// The raw tag this type was parsed from
    pub fn as_str(&self) -> &str {
        match self {
            OutputType::JsModule => "js/module",
            OutputType::JsScript => "js/script",
            OutputType::JsOther(tag) | OutputType::Asset(tag) | OutputType::Other(tag) => tag,
        }
    }

    /// Whether the output carries compiled JS
    pub fn is_js(&self) -> bool {
        self.as_str().starts_with(JS_PREFIX)
    }

    /// Whether the output runs at load time instead of being registered
    pub fn is_script(&self) -> bool {
        self.as_str().starts_with(SCRIPT_PREFIX)
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for OutputType {
    fn from(tag: &str) -> Self {
        OutputType::parse(tag)
    }
}

impl Serialize for OutputType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OutputType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(OutputType::parse(&tag))
    }
}

/// Line count of a JS output as reported by the transformer.
///
/// The value is kept exactly as received, including `NaN`, infinities,
/// absence and values that are not numbers at all, so validation can report
/// the offending value verbatim.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LineCount {
    #[default]
    Missing,
    Number(f64),
    /// Anything else the transformer put there, e.g. `"3"` or `true`
    Invalid(Value),
}

impl LineCount {
    pub fn new(value: f64) -> Self {
        LineCount::Number(value)
    }

    pub fn missing() -> Self {
        LineCount::Missing
    }

    pub fn invalid(value: Value) -> Self {
        LineCount::Invalid(value)
    }

    /// The numeric value, finite or not
    pub fn value(&self) -> Option<f64> {
        match self {
            LineCount::Number(value) => Some(*value),
            LineCount::Missing | LineCount::Invalid(_) => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, LineCount::Missing)
    }

    /// The count if it is a finite number
    pub fn finite(&self) -> Option<f64> {
        self.value().filter(|value| value.is_finite())
    }
}

impl From<f64> for LineCount {
    fn from(value: f64) -> Self {
        LineCount::new(value)
    }
}

impl From<usize> for LineCount {
    fn from(value: usize) -> Self {
        LineCount::new(value as f64)
    }
}

impl fmt::Display for LineCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineCount::Missing => f.write_str("undefined"),
            LineCount::Number(value) if value.is_nan() => f.write_str("NaN"),
            LineCount::Number(value) if *value == f64::INFINITY => f.write_str("Infinity"),
            LineCount::Number(value) if *value == f64::NEG_INFINITY => f.write_str("-Infinity"),
            LineCount::Number(value) => write!(f, "{}", value),
            // strings interpolate without their quotes
            LineCount::Invalid(Value::String(text)) => f.write_str(text),
            LineCount::Invalid(other) => write!(f, "{}", other),
        }
    }
}

impl Serialize for LineCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LineCount::Missing => serializer.serialize_none(),
            LineCount::Number(value) if value.is_finite() => serializer.serialize_f64(*value),
            // JSON has no literal for these, keep them readable
            LineCount::Number(_) => serializer.serialize_str(&self.to_string()),
            LineCount::Invalid(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for LineCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        fn numeric(raw: &Value) -> Option<f64> {
            match raw {
                Value::Number(number) => number.as_f64(),
                Value::String(text) => match text.as_str() {
                    "NaN" => Some(f64::NAN),
                    "Infinity" => Some(f64::INFINITY),
                    "-Infinity" => Some(f64::NEG_INFINITY),
                    _ => None,
                },
                _ => None,
            }
        }

        let raw = Value::deserialize(deserializer)?;
        if raw.is_null() {
            return Ok(LineCount::missing());
        }
        Ok(match numeric(&raw) {
            Some(value) => LineCount::new(value),
            None => LineCount::invalid(raw),
        })
    }
}

/// Payload of a JS-family output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsOutputData {
    pub code: String,

    #[serde(default, skip_serializing_if = "LineCount::is_missing")]
    pub line_count: LineCount,

    /// Raw source map segments, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_map: Option<Value>,
}

impl JsOutputData {
    pub fn new(code: impl Into<String>, line_count: impl Into<LineCount>) -> Self {
        Self {
            code: code.into(),
            line_count: line_count.into(),
            map: None,
            function_map: None,
        }
    }
}

/// Output payload. Non-JS payloads are carried but never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputData {
    Js(JsOutputData),
    Opaque(Value),
}

impl OutputData {
    pub fn as_js(&self) -> Option<&JsOutputData> {
        match self {
            OutputData::Js(data) => Some(data),
            OutputData::Opaque(_) => None,
        }
    }
}

/// One transform result attached to a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    #[serde(rename = "type")]
    pub output_type: OutputType,
    pub data: OutputData,
}

impl Output {
    pub fn new(output_type: impl Into<OutputType>, data: OutputData) -> Self {
        Self {
            output_type: output_type.into(),
            data,
        }
    }

    /// JS output with the line count taken from the code
    pub fn js(output_type: impl Into<OutputType>, code: impl Into<String>) -> Self {
        let code = code.into();
        let line_count = count_lines(&code);
        Self::new(output_type, OutputData::Js(JsOutputData::new(code, line_count)))
    }

    pub fn js_module(code: impl Into<String>) -> Self {
        Self::js(OutputType::JsModule, code)
    }

    pub fn js_script(code: impl Into<String>) -> Self {
        Self::js(OutputType::JsScript, code)
    }

    pub fn asset(tag: &str, data: Value) -> Self {
        Self::new(tag, OutputData::Opaque(data))
    }

    pub fn js_data(&self) -> Option<&JsOutputData> {
        self.data.as_js()
    }
}

/// Number of lines in `code`, counting `\r\n`, `\r`, `\n`, U+2028 and U+2029
/// as terminators.
pub fn count_lines(code: &str) -> usize {
    let mut lines = 1;
    let mut chars = code.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines += 1;
            }
            '\n' | '\u{2028}' | '\u{2029}' => lines += 1,
            _ => {}
        }
    }
    lines
}
