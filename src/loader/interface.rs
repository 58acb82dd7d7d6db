use crate::error::Result;

/// A named-byte-source provider for template bodies.
pub trait TemplateSource {
    /// Reads the template addressed by `identifier`.
    ///
    /// # Returns
    /// * `Result<Vec<u8>>` - The raw template body
    ///
    /// # Errors
    /// * `Error::PathEscapeError` if `identifier` points outside the source's root
    /// * `Error::TemplateNotFoundError` if nothing is stored under `identifier`
    fn read(&self, identifier: &str) -> Result<Vec<u8>>;

    /// Short description used in log output.
    fn describe(&self) -> String;
}
