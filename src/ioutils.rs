use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::guard;

/// Creates `dest_path` and any missing parents with owner/group-only permissions.
///
/// Existing directories are left untouched, permissions included.
pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> std::io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(crate::constants::permissions::DIRECTORY_MODE);
    }
    builder.create(dest_path.as_ref())
}

/// Creates `base` and every directory in `dirs` beneath it.
///
/// Entries are relative to `base` and go through [`guard::sanitize`]. The
/// operation is idempotent.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - The directories that did not exist before
///
/// # Errors
/// * `Error::PathEscapeError` if an entry leaves `base`, lexically or through
///   a symlink
/// * `Error::DirectoryError` naming the first entry that could not be created
pub fn ensure_tree<P, S>(base: P, dirs: &[S]) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let base = base.as_ref();
    let mut created = Vec::new();

    if !base.is_dir() {
        create_dir_all(base).map_err(|source| Error::DirectoryError {
            path: base.display().to_string(),
            source,
        })?;
        created.push(base.to_path_buf());
    }

    for dir in dirs {
        let dir = dir.as_ref();
        let path = guard::resolve(dir, base)?;
        guard::verify_nearest_ancestor(&path, base)?;
        if path.is_dir() {
            continue;
        }
        create_dir_all(&path)
            .map_err(|source| Error::DirectoryError { path: dir.to_string(), source })?;
        guard::verify_contained(&path, base)?;
        created.push(path);
    }
    Ok(created)
}

/// Hex-encoded SHA-256 digest of `content`.
pub fn sha256_hex(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}
