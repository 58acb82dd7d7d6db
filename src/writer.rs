//! Crash-safe file output.
//!
//! Content is written to a uniquely named sibling of the target, flushed to
//! disk and renamed over the target. Readers observe either the old file or
//! the complete new one. In-flight files are named
//! `.tmp_<file name>_<random suffix>` and never survive a failed write.

use log::{debug, warn};
use rand::{rngs::OsRng, RngCore};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, PathPersistError, TempPath};

use crate::constants::{TEMP_FILE_PREFIX, TEMP_SUFFIX_ALPHABET, TEMP_SUFFIX_LEN};
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::{guard, ioutils};

/// Random suffix for temporary file names, drawn from the OS entropy source.
fn random_suffix() -> std::io::Result<String> {
    let mut bytes = [0u8; TEMP_SUFFIX_LEN];
    OsRng.try_fill_bytes(&mut bytes).map_err(std::io::Error::other)?;
    Ok(bytes
        .iter()
        .map(|b| TEMP_SUFFIX_ALPHABET[*b as usize % TEMP_SUFFIX_ALPHABET.len()] as char)
        .collect())
}

/// Removes a temporary file, logging rather than failing if that is impossible.
fn discard(temp: TempPath) {
    let path = temp.to_path_buf();
    if let Err(e) = temp.close() {
        warn!("Failed to remove temporary file {}: {}", path.display(), e);
    }
}

/// Writes files below a base directory with all-or-nothing semantics.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    base: PathBuf,
}

impl AtomicFileWriter {
    /// Creates a writer rooted at `base`. The directory does not need to exist yet.
    pub fn new<P: AsRef<Path>>(base: P) -> Result<Self> {
        Ok(Self { base: guard::absolutize(base)? })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Atomically replaces `target` with `content`.
    ///
    /// # Arguments
    /// * `target` - Path relative to the base, or absolute inside it
    /// * `content` - Complete file body; must not be empty
    ///
    /// # Returns
    /// * `Result<PathBuf>` - The absolute path that was written
    ///
    /// # Errors
    /// * `Error::PathEscapeError` if `target` leaves the base directory
    /// * `Error::EmptyOutputError` if nothing would be written; the target is untouched
    /// * `Error::WriteError` if the temporary file cannot be created or written
    /// * `Error::CommitError` if the final rename fails
    pub fn write<P: AsRef<Path>>(&self, target: P, content: &[u8]) -> Result<PathBuf> {
        let target = target.as_ref();
        let target_name = target.display().to_string();
        let path = guard::resolve(target, &self.base)?;
        if path == self.base {
            return Err(Error::ValidationError(format!(
                "target '{target_name}' resolves to the base directory"
            )));
        }
        let file_name = path.file_name_checked()?;
        let parent = path.parent().ok_or_else(|| {
            Error::ValidationError(format!("target '{target_name}' has no parent directory"))
        })?;

        let write_error = |source| Error::WriteError { target: target_name.clone(), source };

        guard::verify_nearest_ancestor(parent, &self.base)?;
        ioutils::create_dir_all(parent).map_err(write_error)?;
        guard::verify_contained(parent, &self.base)?;

        let temp_name = format!("{TEMP_FILE_PREFIX}{file_name}_{}", random_suffix().map_err(write_error)?);
        // Exclusive creation; an existing file with this name is an error, not a retry.
        let mut temp = Builder::new()
            .prefix(&temp_name)
            .rand_bytes(0)
            .tempfile_in(parent)
            .map_err(write_error)?;
        debug!("Writing {} bytes to {}", content.len(), temp.path().display());

        if let Err(e) = temp.write_all(content).and_then(|_| temp.flush()) {
            discard(temp.into_temp_path());
            return Err(write_error(e));
        }
        // Surfaces deferred write errors before the handle is closed.
        if let Err(e) = temp.as_file().sync_all() {
            discard(temp.into_temp_path());
            return Err(write_error(e));
        }
        let temp = temp.into_temp_path();

        let written = match std::fs::metadata(&temp) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                discard(temp);
                return Err(write_error(e));
            }
        };
        if written == 0 {
            discard(temp);
            return Err(Error::EmptyOutputError { target: target_name });
        }

        if let Err(PathPersistError { error, path: leftover }) = temp.persist(&path) {
            discard(leftover);
            return Err(Error::CommitError { target: target_name, source: error });
        }
        debug!("Committed {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn temp_files(dir: &Path) -> Vec<PathBuf> {
        let mut found = Vec::new();
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                found.extend(temp_files(&path));
            } else if path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(TEMP_FILE_PREFIX))
            {
                found.push(path);
            }
        }
        found
    }

    #[test]
    fn writes_exact_bytes() {
        let tmp = TempDir::new().unwrap();
        let writer = AtomicFileWriter::new(tmp.path()).unwrap();

        let path = writer.write("go.mod", b"module example.com/demo\n").unwrap();
        assert_eq!(path, tmp.path().join("go.mod"));
        assert_eq!(fs::read(&path).unwrap(), b"module example.com/demo\n");
        assert!(temp_files(tmp.path()).is_empty());
    }

    #[test]
    fn creates_missing_parents() {
        let tmp = TempDir::new().unwrap();
        let writer = AtomicFileWriter::new(tmp.path().join("project")).unwrap();
        let path = writer.write("cmd/api/main.go", b"package main\n").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "package main\n");
    }

    #[test]
    fn replaces_existing_files() {
        let tmp = TempDir::new().unwrap();
        let writer = AtomicFileWriter::new(tmp.path()).unwrap();
        fs::write(tmp.path().join("README.md"), "old contents that are longer").unwrap();

        writer.write("README.md", b"new").unwrap();
        assert_eq!(fs::read_to_string(tmp.path().join("README.md")).unwrap(), "new");
        assert!(temp_files(tmp.path()).is_empty());
    }

    #[test]
    fn empty_content_leaves_target_untouched() {
        let tmp = TempDir::new().unwrap();
        let writer = AtomicFileWriter::new(tmp.path()).unwrap();

        let err = writer.write("empty.txt", b"").unwrap_err();
        assert!(matches!(err, Error::EmptyOutputError { ref target } if target == "empty.txt"));
        assert!(!tmp.path().join("empty.txt").exists());

        fs::write(tmp.path().join("kept.txt"), "previous").unwrap();
        assert!(writer.write("kept.txt", b"").is_err());
        assert_eq!(fs::read_to_string(tmp.path().join("kept.txt")).unwrap(), "previous");
        assert!(temp_files(tmp.path()).is_empty());
    }

    #[test]
    fn rejects_escaping_targets() {
        let tmp = TempDir::new().unwrap();
        let writer = AtomicFileWriter::new(tmp.path().join("project")).unwrap();

        assert!(matches!(writer.write("../x", b"x"), Err(Error::PathEscapeError { .. })));
        assert!(matches!(
            writer.write(tmp.path().join("outside.txt"), b"x"),
            Err(Error::PathEscapeError { .. })
        ));
        assert!(!tmp.path().join("x").exists());
        assert!(!tmp.path().join("outside.txt").exists());
    }

    #[test]
    fn rejects_the_base_itself() {
        let tmp = TempDir::new().unwrap();
        let writer = AtomicFileWriter::new(tmp.path()).unwrap();
        assert!(matches!(writer.write(".", b"x"), Err(Error::ValidationError(_))));
    }

    #[test]
    fn failed_commit_cleans_up() {
        let tmp = TempDir::new().unwrap();
        let writer = AtomicFileWriter::new(tmp.path()).unwrap();
        fs::create_dir(tmp.path().join("occupied")).unwrap();
        fs::write(tmp.path().join("occupied").join("child"), "x").unwrap();

        let err = writer.write("occupied", b"content").unwrap_err();
        assert!(matches!(err, Error::CommitError { .. }), "{err:?}");
        assert!(tmp.path().join("occupied").is_dir());
        assert!(temp_files(tmp.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn refuses_symlinked_parent_outside_base() {
        let tmp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), tmp.path().join("link")).unwrap();

        let writer = AtomicFileWriter::new(tmp.path()).unwrap();
        assert!(matches!(
            writer.write("link/file.txt", b"x"),
            Err(Error::PathEscapeError { .. })
        ));
        assert!(!outside.path().join("file.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn creates_no_directories_through_escaping_symlinks() {
        let tmp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), tmp.path().join("link")).unwrap();

        let writer = AtomicFileWriter::new(tmp.path()).unwrap();
        assert!(matches!(
            writer.write("link/new/sub/file.txt", b"x"),
            Err(Error::PathEscapeError { .. })
        ));
        assert!(!outside.path().join("new").exists());
        assert_eq!(fs::read_dir(outside.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn written_files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = TempDir::new().unwrap();
        let writer = AtomicFileWriter::new(tmp.path()).unwrap();
        let path = writer.write("secret.yaml", b"password: x\n").unwrap();
        let mode = fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }

    #[test]
    fn concurrent_writers_leave_one_complete_version() {
        let tmp = TempDir::new().unwrap();
        let writer = AtomicFileWriter::new(tmp.path()).unwrap();
        let bodies: Vec<Vec<u8>> = (0..8u8).map(|i| vec![b'a' + i; 4096]).collect();

        std::thread::scope(|scope| {
            for body in &bodies {
                let writer = &writer;
                scope.spawn(move || writer.write("shared.txt", body).unwrap());
            }
        });

        let result = fs::read(tmp.path().join("shared.txt")).unwrap();
        assert!(bodies.contains(&result));
        assert!(temp_files(tmp.path()).is_empty());
    }

    #[test]
    fn random_suffix_uses_the_alphabet() {
        let suffix = random_suffix().unwrap();
        assert_eq!(suffix.len(), TEMP_SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| TEMP_SUFFIX_ALPHABET.contains(&b)));
        assert_ne!(suffix, random_suffix().unwrap());
    }
}
