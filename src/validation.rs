use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::sync::LazyLock;

use crate::constants::KNOWN_FEATURES;
use crate::error::{Error, Result};

/// Allow-list for module paths. Anchored on both ends; ASCII classes only.
static MODULE_PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._/\-]+$").expect("module path pattern is valid")
});

/// Validates a module identifier before it may be handed to an external command.
///
/// # Errors
/// * `Error::EmptyIdentifierError` if `name` is empty
/// * `Error::InvalidIdentifierError` if `name` does not start with a letter or digit
///   followed by one or more letters, digits, `.`, `-`, `_` or `/`
pub fn validate_module_path(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::EmptyIdentifierError);
    }
    if !MODULE_PATH_PATTERN.is_match(name) {
        return Err(Error::InvalidIdentifierError { identifier: name.to_string() });
    }
    Ok(())
}

/// A module identifier that has passed [`validate_module_path`].
///
/// This is the only type the module initialisation step accepts, so an
/// unvalidated string cannot reach the subprocess argument list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModulePath(String);

impl ModulePath {
    pub fn parse<S: Into<String>>(name: S) -> Result<Self> {
        let name = name.into();
        validate_module_path(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModulePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ModulePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses a comma-separated feature list.
///
/// Entries are trimmed and empty entries dropped, so `""` yields no features.
/// Unknown features are rejected.
pub fn parse_features(raw: &str) -> Result<BTreeSet<String>> {
    let mut features = BTreeSet::new();
    for feature in raw.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        if !KNOWN_FEATURES.contains(&feature) {
            return Err(Error::ValidationError(format!(
                "unknown feature '{feature}' (known features: {})",
                KNOWN_FEATURES.join(", ")
            )));
        }
        features.insert(feature.to_string());
    }
    Ok(features)
}

/// Validates the project name, which becomes a directory and template value.
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::ValidationError("project name cannot be empty".into()));
    }
    if name == "." || name.contains(|c: char| c == '/' || c == '\\') || name.chars().any(char::is_control) {
        return Err(Error::ValidationError(format!(
            "project name '{}' must be a single path segment",
            name.escape_debug()
        )));
    }
    if name == ".." {
        return Err(Error::PathEscapeError {
            path: name.to_string(),
            reason: "project name is a '..' segment".into(),
        });
    }
    Ok(())
}
