use crate::errors::ConfigError;
use crate::paths::normalize_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "modwrap.yaml";

/// Bundle wrapping configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleConfig {
    /// Inject verbose module names (default: false)
    #[serde(default)]
    pub dev: bool,

    /// Root that verbose names are relative to. Relative paths are resolved
    /// against the directory holding the config file.
    #[serde(default)]
    pub project_root: Option<PathBuf>,

    /// Wrap modules on the rayon pool (default: false)
    #[serde(default)]
    pub parallel: bool,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            dev: false,
            project_root: None,
            parallel: false,
        }
    }
}

/// Settings given on the command line; `None` keeps the file value
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub dev: Option<bool>,
    pub project_root: Option<PathBuf>,
    pub parallel: Option<bool>,
}

impl BundleConfig {
    /// Load configuration from a JSON or YAML file, chosen by extension
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content)?,
            _ => Self::from_yaml(&content)?,
        };

        if let Some(root) = config.project_root.take() {
            let root = if root.is_relative() {
                config_dir(path)?.join(root)
            } else {
                root
            };
            config.project_root = Some(normalize_path(&root));
        }
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Write the default configuration to `path` as YAML
    pub fn init_file(path: &Path) -> Result<(), ConfigError> {
        let config = BundleConfig {
            project_root: Some(PathBuf::from(".")),
            ..BundleConfig::default()
        };
        std::fs::write(path, serde_yaml::to_string(&config)?)?;
        Ok(())
    }

    /// Apply command line overrides on top of this configuration
    pub fn merge_cli(&mut self, overrides: CliOverrides) {
        if let Some(dev) = overrides.dev {
            self.dev = dev;
        }
        if let Some(project_root) = overrides.project_root {
            self.project_root = Some(project_root);
        }
        if let Some(parallel) = overrides.parallel {
            self.parallel = parallel;
        }
    }
}

/// Absolute directory holding the config file, so a bare `modwrap.yaml`
/// still has a parent
fn config_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let path = path.canonicalize()?;
    Ok(path.parent().map(Path::to_path_buf).unwrap_or(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BundleConfig::default();
        assert!(!config.dev);
        assert!(!config.parallel);
        assert!(config.project_root.is_none());
    }

    #[test]
    fn test_deserialize_json_config() {
        let json = r#"{"dev": true, "projectRoot": "/root", "unknownKey": 3}"#;
        let config = BundleConfig::from_json(json).unwrap();
        assert!(config.dev);
        assert_eq!(config.project_root, Some(PathBuf::from("/root")));
    }

    #[test]
    fn test_deserialize_yaml_config() {
        let yaml = "dev: true\nparallel: true\n";
        let config = BundleConfig::from_yaml(yaml).unwrap();
        assert!(config.dev);
        assert!(config.parallel);
    }

    #[test]
    fn test_relative_project_root_resolved_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "projectRoot: app\n").unwrap();

        let config = BundleConfig::from_file(&path).unwrap();
        let dir = dir.path().canonicalize().unwrap();
        assert_eq!(config.project_root, Some(dir.join("app")));
    }

    #[test]
    fn test_relative_project_root_uses_canonical_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "projectRoot: ./app/../src\n").unwrap();

        let path = dir.path().join("sub").join("..").join(CONFIG_FILE_NAME);
        let config = BundleConfig::from_file(&path).unwrap();

        let dir = dir.path().canonicalize().unwrap();
        let root = config.project_root.unwrap();
        assert!(root.is_absolute());
        assert_eq!(root, dir.join("src"));
    }

    #[test]
    fn test_absolute_project_root_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modwrap.json");
        std::fs::write(&path, r#"{"projectRoot": "/root/src/.."}"#).unwrap();

        let config = BundleConfig::from_file(&path).unwrap();
        assert_eq!(config.project_root, Some(PathBuf::from("/root")));
    }

    #[test]
    fn test_init_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        BundleConfig::init_file(&path).unwrap();

        let config = BundleConfig::from_file(&path).unwrap();
        assert!(!config.dev);
        assert_eq!(config.project_root, Some(dir.path().canonicalize().unwrap()));
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = BundleConfig {
            dev: true,
            project_root: Some(PathBuf::from("/a")),
            parallel: false,
        };
        config.merge_cli(CliOverrides {
            dev: None,
            project_root: Some(PathBuf::from("/b")),
            parallel: Some(true),
        });

        assert!(config.dev);
        assert_eq!(config.project_root, Some(PathBuf::from("/b")));
        assert!(config.parallel);
    }
}
