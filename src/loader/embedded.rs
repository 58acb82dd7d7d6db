use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::guard;
use crate::loader::interface::TemplateSource;
use indexmap::IndexMap;
use std::borrow::Cow;
use std::path::Path;

/// Templates compiled into the binary, keyed by identifier.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("main.go.tmpl", include_str!("../../templates/main.go.tmpl")),
    ("config.go.tmpl", include_str!("../../templates/config.go.tmpl")),
    ("config.yaml.tmpl", include_str!("../../templates/config.yaml.tmpl")),
    ("logger.go.tmpl", include_str!("../../templates/logger.go.tmpl")),
    ("database.go.tmpl", include_str!("../../templates/database.go.tmpl")),
    ("server.go.tmpl", include_str!("../../templates/server.go.tmpl")),
    ("routes.go.tmpl", include_str!("../../templates/routes.go.tmpl")),
    ("handlers.go.tmpl", include_str!("../../templates/handlers.go.tmpl")),
    ("errors.go.tmpl", include_str!("../../templates/errors.go.tmpl")),
    ("README.md.tmpl", include_str!("../../templates/README.md.tmpl")),
    ("gitignore.tmpl", include_str!("../../templates/gitignore.tmpl")),
    ("Makefile.tmpl", include_str!("../../templates/Makefile.tmpl")),
    ("Dockerfile.tmpl", include_str!("../../templates/Dockerfile.tmpl")),
    ("docker-compose.yml.tmpl", include_str!("../../templates/docker-compose.yml.tmpl")),
    ("kubernetes.yaml.tmpl", include_str!("../../templates/kubernetes.yaml.tmpl")),
    ("github-ci.yml.tmpl", include_str!("../../templates/github-ci.yml.tmpl")),
    ("auth.go.tmpl", include_str!("../../templates/auth.go.tmpl")),
    ("metrics.go.tmpl", include_str!("../../templates/metrics.go.tmpl")),
    ("tracing.go.tmpl", include_str!("../../templates/tracing.go.tmpl")),
];

/// In-memory template source.
///
/// [`EmbeddedSource::builtin`] serves the templates shipped with the binary;
/// additional bodies can be inserted for overrides and tests. Identifiers go
/// through the same traversal checks as on-disk sources.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedSource {
    templates: IndexMap<String, Cow<'static, str>>,
}

impl EmbeddedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// The templates shipped with the binary.
    pub fn builtin() -> Self {
        let templates = BUILTIN_TEMPLATES
            .iter()
            .map(|(name, body)| (name.to_string(), Cow::Borrowed(*body)))
            .collect();
        Self { templates }
    }

    /// Stores `body` under `identifier`, replacing any previous body.
    pub fn insert(&mut self, identifier: impl Into<String>, body: impl Into<String>) {
        self.templates.insert(identifier.into(), Cow::Owned(body.into()));
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.templates.contains_key(identifier)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    fn key(identifier: &str) -> Result<String> {
        let path = Path::new(identifier);
        if path.is_absolute() {
            return Err(Error::PathEscapeError {
                path: identifier.to_string(),
                reason: "embedded templates are addressed by relative identifiers".into(),
            });
        }
        // Relative inputs never consult the base.
        let cleaned = guard::sanitize(path, Path::new("."))?;
        Ok(cleaned.to_str_checked()?.replace('\\', "/"))
    }
}

impl TemplateSource for EmbeddedSource {
    fn read(&self, identifier: &str) -> Result<Vec<u8>> {
        let key = Self::key(identifier)?;
        self.templates
            .get(&key)
            .map(|body| body.as_bytes().to_vec())
            .ok_or_else(|| Error::TemplateNotFoundError { template: identifier.to_string() })
    }

    fn describe(&self) -> String {
        format!("embedded templates ({})", self.templates.len())
    }
}
