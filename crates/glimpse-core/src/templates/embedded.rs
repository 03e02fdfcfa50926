//! Compile-time embedded templates.
//!
//! Paths are relative to this source file
//! (`crates/glimpse-core/src/templates/embedded.rs`).
//!
//! ## Warning
//!
//! Do NOT rename or move template files without updating the `include_str!` path here.
//! Do NOT modify template files without checking that the Handlebars variables still match
//! what [`super::renderer::TemplateRenderer::render_contract`] passes in, and that
//! both marker pairs survive rendering.

/// Contract skeleton with the META and CONSTRUCTOR marker regions.
///
/// Handlebars variables: `contract_name`, `strategy`, `declare_questions`,
/// `constructor_region`.
pub const STUDY_CONTRACT: &str = include_str!("../../templates/contracts/StudyVoting.sol.tmpl");
