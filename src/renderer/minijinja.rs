use super::filters;
use crate::{
    context::GenerationContext,
    error::{Error, Result},
    loader::TemplateSource,
    renderer::interface::TemplateRenderer,
};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

/// MiniJinja-based template rendering engine.
///
/// Output is produced verbatim: trailing newlines are kept and no
/// auto-escaping is applied whatever the template name. Referencing an
/// undefined value is an error rather than an empty string.
pub struct MiniJinjaRenderer {
    /// Shared environment; cloned for each render
    env: Environment<'static>,
    /// Where template bodies are read from
    source: Box<dyn TemplateSource>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer reading templates from `source`.
    pub fn new(source: Box<dyn TemplateSource>) -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        filters::register(&mut env);

        Self { env, source }
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, source: &str, context: &GenerationContext) -> Result<Vec<u8>> {
        let bytes = self.source.read(source)?;
        let body = String::from_utf8(bytes).map_err(|e| Error::TemplateSyntaxError {
            template: source.to_string(),
            reason: format!("template is not valid UTF-8: {e}"),
        })?;
        log::trace!("Rendering template '{source}'");
        Ok(self.render_str(source, &body, &context.to_value())?.into_bytes())
    }

    fn render_str(
        &self,
        name: &str,
        template: &str,
        context: &serde_json::Value,
    ) -> Result<String> {
        let mut env = self.env.clone();
        env.add_template_owned(name.to_string(), template.to_string()).map_err(|e| {
            Error::TemplateSyntaxError { template: name.to_string(), reason: e.to_string() }
        })?;

        let tmpl = env.get_template(name).map_err(|source| Error::TemplateExecutionError {
            template: name.to_string(),
            source,
        })?;
        tmpl.render(context)
            .map_err(|source| Error::TemplateExecutionError { template: name.to_string(), source })
    }
}
