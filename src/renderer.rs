//! Template rendering for generated sources.
//! Templates only lay out text; every type, literal and identifier decision is
//! made before rendering and arrives in the context.
use crate::error::Result;
use minijinja::{Environment, UndefinedBehavior};

/// Lays out a target's source file from its declaration context.
///
/// Shared across batch threads, hence `Send + Sync`.
pub trait TemplateRenderer: Send + Sync {
    /// Renders `template` against `context` (banner, naming fields, flags).
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based renderer for the embedded target templates.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer whose block tags leave no blank lines behind and
    /// which fails on undefined variables instead of printing nothing.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_filter("prefixed", prefixed);
        Self { env }
    }
}

/// `{{ line|prefixed("// ") }}`: prepends a comment prefix without leaving
/// trailing whitespace on empty lines.
fn prefixed(value: String, prefix: String) -> String {
    format!("{prefix}{value}").trim_end().to_string()
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::TemplateError` if the template does not compile or refers to
    ///   a variable missing from `context`
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        Ok(self.env.render_str(template, context)?)
    }
}
