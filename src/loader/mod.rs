use crate::error::Result;
use std::path::Path;

pub mod embedded;
pub mod interface;
pub mod local;

pub use embedded::EmbeddedSource;
pub use interface::TemplateSource;
pub use local::LocalSource;

/// Picks the template source for a run: the given directory when there is
/// one, the built-in templates otherwise.
pub fn get_template_source(dir: Option<&Path>) -> Result<Box<dyn TemplateSource>> {
    let source: Box<dyn TemplateSource> = match dir {
        Some(dir) => Box::new(LocalSource::new(dir)?),
        None => Box::new(EmbeddedSource::builtin()),
    };
    log::debug!("Using templates from {}", source.describe());
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_builtin_templates() {
        let source = get_template_source(None).unwrap();
        assert!(source.describe().starts_with("embedded templates"));
        assert!(source.read("main.go.tmpl").is_ok());
    }

    #[test]
    fn uses_the_given_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("x.tmpl"), "x").unwrap();
        let source = get_template_source(Some(dir.path())).unwrap();
        assert_eq!(source.read("x.tmpl").unwrap(), b"x");
        assert!(source.describe().starts_with("local path"));
    }
}
