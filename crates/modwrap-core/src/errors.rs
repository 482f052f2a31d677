use crate::output::LineCount;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Placeholder used in diagnostics when a module record carries no path
pub const UNKNOWN_MODULE: &str = "unknown module";

/// Contract violations detected while selecting or wrapping a module's JS output.
///
/// Both kinds mean the transform stage produced a malformed result. They are
/// fatal for the module being processed and are never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WrapError {
    #[error(
        "Modules must have exactly one JS output, but {} has {count} JS outputs.",
        display_path(.path)
    )]
    WrongOutputCount { path: Option<PathBuf>, count: usize },

    #[error(
        "JS output must populate lineCount, but {} has {output_type} output with lineCount '{line_count}'",
        display_path(.path)
    )]
    InvalidLineCount {
        path: Option<PathBuf>,
        output_type: String,
        line_count: LineCount,
    },
}

impl WrapError {
    /// Path of the offending module, or `"unknown module"`
    pub fn module_path(&self) -> String {
        match self {
            WrapError::WrongOutputCount { path, .. } | WrapError::InvalidLineCount { path, .. } => {
                display_path(path)
            }
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_deref()
        .map(Path::display)
        .map(|p| p.to_string())
        .unwrap_or_else(|| UNKNOWN_MODULE.to_string())
}

/// Errors raised while loading or writing a bundle configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
