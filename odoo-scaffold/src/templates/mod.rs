//! Handlebars rendering for the built-in templates.

use handlebars::Handlebars;
use serde_json::Value;

use crate::error::Result;

pub mod files;
pub use files::*;

/// Template renderer shared by all builders.
///
/// HTML escaping is disabled since the output is generated code, not web
/// content; renderers escape XML/Python text themselves where needed.
pub struct Templates {
    handlebars: Handlebars<'static>,
}

impl Templates {
    /// Create a renderer with escaping disabled.
    #[must_use]
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { handlebars }
    }

    /// Render a template string against a context.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Template`] when the template is malformed;
    /// with the built-in constants this indicates a bug, not bad user input.
    pub fn render(&self, template: &str, context: &Value) -> Result<String> {
        Ok(self.handlebars.render_template(template, context)?)
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape text for embedding in XML attribute or element content.
#[must_use]
pub fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
