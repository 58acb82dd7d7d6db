use std::path::Path;

use crate::error::{Error, Result};

/// Extension trait for Path with the string conversions the pipeline relies on
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use scaffold::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("cmd/api/main.go");
    /// assert_eq!(path.to_str_checked().unwrap(), "cmd/api/main.go");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// Returns the final component as a string slice.
    ///
    /// Fails when the path has no final component (`/`, `..`) or it is not valid Unicode.
    fn file_name_checked(&self) -> Result<&str>;

    /// Whether any segment of the path is `..`.
    ///
    /// Both `/` and `\` count as separators regardless of platform, so a Windows-style
    /// traversal is caught on Unix too. A name that merely contains two dots (`a..b`)
    /// is not a traversal segment.
    fn has_parent_segment(&self) -> bool;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::Other(anyhow::anyhow!(
                "Path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn file_name_checked(&self) -> Result<&str> {
        self.file_name().and_then(|name| name.to_str()).ok_or_else(|| {
            Error::ValidationError(format!(
                "path '{}' does not name a file",
                self.display()
            ))
        })
    }

    fn has_parent_segment(&self) -> bool {
        self.to_string_lossy()
            .split(|c: char| c == '/' || c == '\\')
            .any(|segment| segment == "..")
    }
}
