use crate::context::GenerationContext;
use crate::error::Result;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Reads the template `source` and renders it against `context`.
    ///
    /// # Arguments
    /// * `source` - Template identifier, resolved by the renderer's template source
    /// * `context` - Values bound for this run
    ///
    /// # Returns
    /// * `Result<Vec<u8>>` - The complete rendered output
    ///
    /// # Errors
    /// * `Error::PathEscapeError` / `Error::TemplateNotFoundError` from the source
    /// * `Error::TemplateSyntaxError` if the template does not parse
    /// * `Error::TemplateExecutionError` if evaluation fails, e.g. an undefined value
    fn render(&self, source: &str, context: &GenerationContext) -> Result<Vec<u8>>;

    /// Renders an in-memory template body against a raw value.
    ///
    /// # Arguments
    /// * `name` - Name used in error messages
    /// * `template` - Template body
    /// * `context` - Values to render against
    fn render_str(
        &self,
        name: &str,
        template: &str,
        context: &serde_json::Value,
    ) -> Result<String>;
}
