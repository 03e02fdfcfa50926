//! Handlebars-based renderer for contract skeletons.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled.
//! Strict mode ensures that any `{{variable}}` referenced in a template must be present
//! in the data context, otherwise rendering returns an error. Skeletons produce
//! contract source, and a silently empty contract name would only surface later
//! as a compiler error.
//!
//! ## Usage
//!
//! ```ignore
//! use glimpse_core::templates::{embedded, renderer::TemplateRenderer};
//! use glimpse_core::formatter::FormatStrategy;
//!
//! let renderer = TemplateRenderer::new();
//! let skeleton = renderer.render_contract(
//!     embedded::STUDY_CONTRACT,
//!     "SleepStudy",
//!     FormatStrategy::IncrementalPush,
//! )?;
//! ```

use handlebars::Handlebars;
use serde_json::Value;

use crate::error::{GlimpseError, Result};
use crate::formatter::{FormatStrategy, CONSTRUCTOR_INFORMATION};

/// Template renderer using Handlebars for generating contract skeletons.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with strict mode enabled.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        Self { hbs }
    }

    /// Render a template string with the given data context.
    pub fn render(&self, template: &str, data: &Value) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| GlimpseError::TemplateRender(e.to_string()))
    }

    /// Render a contract skeleton laid out for `strategy`.
    ///
    /// The skeleton only declares `BinaryQuestions` itself when the strategy
    /// pushes questions from the constructor, and only carries the
    /// CONSTRUCTOR region when the strategy fills it.
    pub fn render_contract(
        &self,
        template: &str,
        contract_name: &str,
        strategy: FormatStrategy,
    ) -> Result<String> {
        if !is_identifier(contract_name) {
            return Err(GlimpseError::TemplateRender(format!(
                "'{contract_name}' is not a valid contract name"
            )));
        }
        let data = serde_json::json!({
            "contract_name": contract_name,
            "strategy": strategy.as_str(),
            "declare_questions": strategy == FormatStrategy::IncrementalPush,
            "constructor_region": strategy.markers().contains(&CONSTRUCTOR_INFORMATION),
        });
        self.render(template, &data)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
