use crate::error::{Error, Result};
use crate::guard;
use crate::loader::interface::TemplateSource;
use std::path::{Path, PathBuf};

/// Template source backed by a directory on the local filesystem.
///
/// Identifiers are paths relative to the directory (or absolute paths inside
/// it). Nothing outside the directory can be read, symlinks included.
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    /// Creates a new LocalSource rooted at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = guard::absolutize(root)?;
        if !root.is_dir() {
            return Err(Error::TemplateNotFoundError { template: root.display().to_string() });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for LocalSource {
    fn read(&self, identifier: &str) -> Result<Vec<u8>> {
        let path = guard::resolve(identifier, &self.root)?;
        if !path.is_file() {
            return Err(Error::TemplateNotFoundError { template: identifier.to_string() });
        }
        guard::verify_contained(&path, &self.root)?;

        log::debug!("Reading template '{}' from {}", identifier, path.display());
        std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                Error::TemplateNotFoundError { template: identifier.to_string() }
            }
            _ => Error::IoError(e),
        })
    }

    fn describe(&self) -> String {
        format!("local path: '{}'", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn source_with(files: &[(&str, &str)]) -> (TempDir, LocalSource) {
        let dir = TempDir::new().unwrap();
        for (name, body) in files {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, body).unwrap();
        }
        let source = LocalSource::new(dir.path()).unwrap();
        (dir, source)
    }

    #[test]
    fn reads_relative_identifiers() {
        let (_dir, source) = source_with(&[("api/main.go.tmpl", "package main\n")]);
        assert_eq!(source.read("api/main.go.tmpl").unwrap(), b"package main\n");
        assert_eq!(source.read("./api//main.go.tmpl").unwrap(), b"package main\n");
    }

    #[test]
    fn reads_absolute_identifiers_inside_root() {
        let (dir, source) = source_with(&[("a.tmpl", "a")]);
        let absolute = dir.path().join("a.tmpl");
        assert_eq!(source.read(absolute.to_str().unwrap()).unwrap(), b"a");
    }

    #[test]
    fn missing_templates_are_reported() {
        let (_dir, source) = source_with(&[]);
        assert!(matches!(
            source.read("missing.tmpl"),
            Err(Error::TemplateNotFoundError { .. })
        ));
    }

    #[test]
    fn directories_are_not_templates() {
        let (_dir, source) = source_with(&[("nested/a.tmpl", "a")]);
        assert!(matches!(source.read("nested"), Err(Error::TemplateNotFoundError { .. })));
    }

    #[test]
    fn refuses_to_leave_the_root() {
        let outside = TempDir::new().unwrap();
        let secret = outside.path().join("secret.tmpl");
        fs::write(&secret, "secret").unwrap();

        let (_dir, source) = source_with(&[]);
        assert!(matches!(source.read("../secret.tmpl"), Err(Error::PathEscapeError { .. })));
        assert!(matches!(
            source.read(secret.to_str().unwrap()),
            Err(Error::PathEscapeError { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn refuses_symlinks_pointing_outside() {
        let outside = TempDir::new().unwrap();
        let secret = outside.path().join("secret.tmpl");
        fs::write(&secret, "secret").unwrap();

        let (dir, source) = source_with(&[]);
        std::os::unix::fs::symlink(&secret, dir.path().join("link.tmpl")).unwrap();
        assert!(matches!(source.read("link.tmpl"), Err(Error::PathEscapeError { .. })));
    }

    #[test]
    fn missing_root_is_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(LocalSource::new(dir.path().join("nope")).is_err());
    }
}
