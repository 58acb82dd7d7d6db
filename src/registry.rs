//! Mapping of generated files to the templates that produce them.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::{ConfigFile, DeploymentConfig};

/// Files every project gets, as (target, template).
const BASE_TEMPLATES: &[(&str, &str)] = &[
    (".gitignore", "gitignore.tmpl"),
    ("Makefile", "Makefile.tmpl"),
    ("README.md", "README.md.tmpl"),
    ("cmd/api/main.go", "main.go.tmpl"),
    ("config.yaml", "config.yaml.tmpl"),
    ("internal/api/routes/routes.go", "routes.go.tmpl"),
    ("internal/config/config.go", "config.go.tmpl"),
    ("internal/core/errors/errors.go", "errors.go.tmpl"),
    ("internal/core/server/server.go", "server.go.tmpl"),
    ("internal/handlers/handlers.go", "handlers.go.tmpl"),
    ("pkg/database/database.go", "database.go.tmpl"),
    ("pkg/logger/logger.go", "logger.go.tmpl"),
];

/// Files added when a feature is selected, as (feature, target, template).
const FEATURE_TEMPLATES: &[(&str, &str, &str)] = &[
    ("auth", "internal/core/middleware/auth.go", "auth.go.tmpl"),
    ("metrics", "pkg/metrics/metrics.go", "metrics.go.tmpl"),
    ("tracing", "pkg/tracing/tracing.go", "tracing.go.tmpl"),
];

const DOCKER_TEMPLATES: &[(&str, &str)] = &[
    ("Dockerfile", "Dockerfile.tmpl"),
    ("docker-compose.yml", "docker-compose.yml.tmpl"),
];

const KUBERNETES_TEMPLATES: &[(&str, &str)] = &[
    ("Dockerfile", "Dockerfile.tmpl"),
    ("deployments/kubernetes.yaml", "kubernetes.yaml.tmpl"),
];

const GITHUB_CI_TEMPLATES: &[(&str, &str)] =
    &[(".github/workflows/ci.yml", "github-ci.yml.tmpl")];

/// Target path to template identifier, iterated in target order.
///
/// Targets are not validated on insertion; the generator checks each one
/// before anything is written for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateRegistry {
    entries: BTreeMap<String, String>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in file set for the given features and deployment.
    pub fn builtin(features: &BTreeSet<String>, deployment: &DeploymentConfig) -> Self {
        let mut registry = Self::new();
        registry.extend(BASE_TEMPLATES);

        for (feature, target, source) in FEATURE_TEMPLATES {
            if features.contains(*feature) {
                registry.add_template(*target, *source);
            }
        }
        if deployment.docker {
            registry.extend(DOCKER_TEMPLATES);
        }
        if deployment.kubernetes {
            registry.extend(KUBERNETES_TEMPLATES);
        }
        if deployment.ci == "github" {
            registry.extend(GITHUB_CI_TEMPLATES);
        }
        registry
    }

    fn extend(&mut self, entries: &[(&str, &str)]) {
        for (target, source) in entries {
            self.add_template(*target, *source);
        }
    }

    /// Maps `target` to `source`, returning the source it replaced.
    pub fn add_template(
        &mut self,
        target: impl Into<String>,
        source: impl Into<String>,
    ) -> Option<String> {
        let target = target.into();
        let source = source.into();
        let replaced = self.entries.insert(target.clone(), source.clone());
        if let Some(previous) = &replaced {
            if *previous != source {
                log::debug!("Template for '{target}' replaced: '{previous}' -> '{source}'");
            }
        }
        replaced
    }

    /// Drops `target`, returning its source if it was registered.
    pub fn remove_template(&mut self, target: &str) -> Option<String> {
        self.entries.remove(target)
    }

    /// Applies the `templates` and `remove` sections of a config file.
    ///
    /// Additions are applied first, so a target listed in both ends up removed.
    pub fn apply_config(&mut self, config: &ConfigFile) {
        for (target, source) in &config.templates {
            self.add_template(target, source);
        }
        for target in &config.remove {
            if self.remove_template(target).is_none() {
                log::warn!("Cannot remove '{target}': no such target");
            }
        }
    }

    pub fn get(&self, target: &str) -> Option<&str> {
        self.entries.get(target).map(String::as_str)
    }

    pub fn contains(&self, target: &str) -> bool {
        self.entries.contains_key(target)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries as (target, source), sorted by target.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(target, source)| (target.as_str(), source.as_str()))
    }
}

impl<T: Into<String>, S: Into<String>> FromIterator<(T, S)> for TemplateRegistry {
    fn from_iter<I: IntoIterator<Item = (T, S)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (target, source) in iter {
            registry.add_template(target, source);
        }
        registry
    }
}
