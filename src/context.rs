use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeSet;

use crate::validation::ModulePath;

/// A named resource the generated project should expose (e.g. a REST entity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resource {
    pub name: String,
    pub kind: String,
}

/// Immutable data bound to every template render of a single run.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    project_name: String,
    module_path: ModulePath,
    features: BTreeSet<String>,
    config: serde_json::Value,
    resources: Vec<Resource>,
}

impl GenerationContext {
    pub fn new(
        project_name: impl Into<String>,
        module_path: ModulePath,
        features: BTreeSet<String>,
        config: serde_json::Value,
        resources: Vec<Resource>,
    ) -> Self {
        Self { project_name: project_name.into(), module_path, features, config, resources }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn module_path(&self) -> &ModulePath {
        &self.module_path
    }

    pub fn features(&self) -> &BTreeSet<String> {
        &self.features
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    pub fn config(&self) -> &serde_json::Value {
        &self.config
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// The value templates are rendered against.
    ///
    /// `features` is the sorted feature list, so `{% if "auth" in features %}`
    /// and ordered iteration both work. `name` is kept as an alias of
    /// `project_name`.
    pub fn to_value(&self) -> serde_json::Value {
        json!({
            "project_name": self.project_name,
            "name": self.project_name,
            "module_path": self.module_path,
            "features": self.features,
            "config": self.config,
            "resources": self.resources,
        })
    }
}
