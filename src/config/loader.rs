//! Configuration file loading and validation

use crate::constants::{JSON_CONFIG_EXTENSIONS, YAML_CONFIG_EXTENSIONS};
use crate::context::Resource;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Module initialisation settings. The command itself is not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleInitConfig {
    #[serde(default = "get_default_enabled")]
    pub enabled: bool,
}

impl Default for ModuleInitConfig {
    fn default() -> Self {
        Self { enabled: get_default_enabled() }
    }
}

/// Contents of a `--config` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Template directory; relative paths are taken from the config file's directory
    #[serde(default)]
    pub template_dir: Option<PathBuf>,
    /// Extra registry entries, target to source, applied in order
    #[serde(default)]
    pub templates: IndexMap<String, String>,
    /// Registry targets to drop
    #[serde(default)]
    pub remove: Vec<String>,
    /// Extra skeleton directories
    #[serde(default)]
    pub directories: Vec<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub ci: Option<String>,
    #[serde(default)]
    pub module_init: ModuleInitConfig,
}

impl ConfigFile {
    /// Loads and validates the config file at `path`.
    ///
    /// The format follows the extension: `.json` or `.yaml`/`.yml`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension =
            path.extension().and_then(|ext| ext.to_str()).unwrap_or_default().to_lowercase();
        let is_json = JSON_CONFIG_EXTENSIONS.contains(&extension.as_str());
        let is_yaml = YAML_CONFIG_EXTENSIONS.contains(&extension.as_str());

        if !path.is_file() || !(is_json || is_yaml) {
            return Err(Error::ConfigNotFound {
                path: path.display().to_string(),
                extensions: JSON_CONFIG_EXTENSIONS
                    .iter()
                    .chain(YAML_CONFIG_EXTENSIONS)
                    .map(|ext| format!(".{ext}"))
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: ConfigFile = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        if let Some(dir) = config.template_dir.take() {
            let anchored = match path.parent() {
                Some(parent) if dir.is_relative() => parent.join(dir),
                _ => dir,
            };
            config.template_dir = Some(anchored);
        }

        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(target) = self.templates.keys().find(|target| target.trim().is_empty()) {
            return Err(Error::ConfigValidation(format!(
                "templates: target '{target}' must not be empty"
            )));
        }
        if let Some((target, _)) = self.templates.iter().find(|(_, source)| source.trim().is_empty())
        {
            return Err(Error::ConfigValidation(format!(
                "templates: source for '{target}' must not be empty"
            )));
        }
        if let Some(env) = &self.environment {
            if env.trim().is_empty() {
                return Err(Error::ConfigValidation("environment must not be empty".into()));
            }
        }
        Ok(())
    }
}

fn get_default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(name: &str, content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_yaml() {
        let (dir, path) = write_config(
            "scaffold.yaml",
            r#"
template_dir: templates
templates:
  internal/models/user.go: model.go.tmpl
  README.md: custom-readme.tmpl
remove:
  - Makefile
directories:
  - internal/events
resources:
  - name: user
    kind: rest
environment: production
ci: gitlab
"#,
        );
        let config = ConfigFile::load(&path).unwrap();
        assert_eq!(config.template_dir, Some(dir.path().join("templates")));
        assert_eq!(
            config.templates.keys().collect::<Vec<_>>(),
            vec!["internal/models/user.go", "README.md"]
        );
        assert_eq!(config.remove, vec!["Makefile"]);
        assert_eq!(config.directories, vec!["internal/events"]);
        assert_eq!(config.resources[0].name, "user");
        assert_eq!(config.environment.as_deref(), Some("production"));
        assert_eq!(config.ci.as_deref(), Some("gitlab"));
        assert_eq!(config.module_init, ModuleInitConfig::default());
    }

    #[test]
    fn loads_json() {
        let (_dir, path) = write_config(
            "scaffold.json",
            r#"{"module_init": {"enabled": false}, "template_dir": "/abs/templates"}"#,
        );
        let config = ConfigFile::load(&path).unwrap();
        assert!(!config.module_init.enabled);
        assert_eq!(config.template_dir, Some(PathBuf::from("/abs/templates")));
    }

    #[test]
    fn rejects_unknown_fields() {
        let (_dir, path) = write_config("scaffold.yaml", "templatez: {}\n");
        assert!(matches!(ConfigFile::load(&path), Err(Error::YAMLParseError(_))));
    }

    #[test]
    fn rejects_unsupported_extensions_and_missing_files() {
        let (dir, path) = write_config("scaffold.toml", "");
        assert!(matches!(ConfigFile::load(&path), Err(Error::ConfigNotFound { .. })));
        assert!(matches!(
            ConfigFile::load(dir.path().join("missing.yaml")),
            Err(Error::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn module_init_command_is_not_configurable() {
        let (_dir, path) = write_config(
            "scaffold.json",
            r#"{"module_init": {"command": ["sh", "-c", "echo injected > pwned.txt"]}}"#,
        );
        assert!(matches!(ConfigFile::load(&path), Err(Error::JSONParseError(_))));

        let (_dir, path) = write_config(
            "scaffold.yaml",
            "module_init:\n  enabled: true\n  command: [make, init]\n",
        );
        assert!(matches!(ConfigFile::load(&path), Err(Error::YAMLParseError(_))));
    }

    #[test]
    fn empty_template_entries_are_rejected() {
        let (_dir, path) = write_config("scaffold.json", r#"{"templates": {"a.go": " "}}"#);
        assert!(matches!(ConfigFile::load(&path), Err(Error::ConfigValidation(_))));
    }
}
