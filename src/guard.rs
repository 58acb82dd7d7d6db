//! Path validation for template sources and generation targets.
//!
//! Every path the pipeline reads from or writes to passes through [`sanitize`].
//! Any `..` segment is rejected outright, even where it would stay inside the
//! root (`a/../b`). Absolute paths must lie inside the given base directory.
//! Canonicalization here is lexical; [`verify_contained`] adds the filesystem
//! check for paths that already exist.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::ext::PathExt;

/// Lexically normalizes `path`: drops `.` components and redundant separators
/// and folds `..` into its parent. An empty result becomes `.`.
fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !cleaned.pop() {
                    cleaned.push(component.as_os_str());
                }
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

fn escape_error(path: &Path, reason: impl Into<String>) -> Error {
    Error::PathEscapeError { path: path.display().to_string(), reason: reason.into() }
}

/// Validates `path` and returns its canonical form.
///
/// # Arguments
/// * `path` - Template source or generation target, absolute or relative
/// * `base` - Absolute root that absolute paths must stay inside
///
/// # Returns
/// * `Result<PathBuf>` - The cleaned path; relative inputs stay relative
///
/// # Errors
/// * `Error::ValidationError` if `path` is empty
/// * `Error::PathEscapeError` if `path` has a `..` segment, is rooted without
///   being absolute, or is absolute and outside `base`
pub fn sanitize<P: AsRef<Path>, B: AsRef<Path>>(path: P, base: B) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::ValidationError("path must not be empty".into()));
    }
    if path.has_parent_segment() {
        return Err(escape_error(path, "contains a '..' segment"));
    }

    let cleaned = clean(path);
    if !path.is_absolute() {
        if path.has_root() || matches!(path.components().next(), Some(Component::Prefix(_)))
        {
            return Err(escape_error(path, "rooted paths must be fully absolute"));
        }
        return Ok(cleaned);
    }

    let base = clean(base.as_ref());
    if !base.is_absolute() {
        return Err(Error::ValidationError(format!(
            "base directory '{}' must be absolute",
            base.display()
        )));
    }
    match cleaned.strip_prefix(&base) {
        Ok(_) => Ok(cleaned),
        Err(_) => Err(escape_error(
            path,
            format!("outside base directory '{}'", base.display()),
        )),
    }
}

/// Sanitizes `path` and anchors it under `base`.
///
/// Relative paths are joined onto `base`; absolute paths are returned as-is
/// once [`sanitize`] has confirmed they are inside it.
pub fn resolve<P: AsRef<Path>, B: AsRef<Path>>(path: P, base: B) -> Result<PathBuf> {
    let sanitized = sanitize(path, base.as_ref())?;
    if sanitized.is_absolute() {
        return Ok(sanitized);
    }
    let base = clean(base.as_ref());
    if sanitized == Path::new(".") {
        Ok(base)
    } else {
        Ok(base.join(sanitized))
    }
}

/// Turns `dir` into a clean absolute path, joining it onto the current
/// directory when relative. The directory does not need to exist.
pub fn absolutize<P: AsRef<Path>>(dir: P) -> Result<PathBuf> {
    let dir = dir.as_ref();
    if dir.is_absolute() {
        Ok(clean(dir))
    } else {
        Ok(clean(&std::env::current_dir()?.join(dir)))
    }
}

/// Checks that the existing file or directory `path` resolves, symlinks
/// included, to a location inside `base`.
pub fn verify_contained<P: AsRef<Path>, B: AsRef<Path>>(path: P, base: B) -> Result<()> {
    let path = path.as_ref();
    let real_path = std::fs::canonicalize(path)?;
    let real_base = std::fs::canonicalize(base.as_ref())?;
    if real_path.starts_with(&real_base) {
        Ok(())
    } else {
        Err(escape_error(
            path,
            format!("resolves to '{}' outside '{}'", real_path.display(), real_base.display()),
        ))
    }
}

/// Checks the deepest existing ancestor of `path` (itself included) with
/// [`verify_contained`], so that nothing is created through a symlink that
/// leaves `base`.
///
/// `path` and `base` must be absolute and clean, with `path` lexically inside
/// `base`. When not even `base` exists yet there is nothing to follow and the
/// check passes.
pub fn verify_nearest_ancestor<P: AsRef<Path>, B: AsRef<Path>>(path: P, base: B) -> Result<()> {
    let base = clean(base.as_ref());
    let existing = path.as_ref().ancestors().find(|p| p.symlink_metadata().is_ok());
    match existing {
        Some(ancestor) if ancestor.starts_with(&base) => verify_contained(ancestor, &base),
        _ => Ok(()),
    }
}
