//! Core library for the glimpse study contract renderer.
//!
//! Turns a JSON study description (metadata, voting deadline, yes/no questions,
//! masking keys with proof coefficients) into contract source by formatting each
//! value as a contract literal and splicing the result into marker regions of a
//! contract template.
//!
//! - [`config`]: the [`config::StudyConfig`] model and JSON loading
//! - [`literal`]: literal validation and escaping
//! - [`formatter`]: study to [`formatter::RenderedFragment`]s
//! - [`splicer`]: marker region location and replacement
//! - [`render`]: the end-to-end pipeline
//! - [`templates`] and [`project`]: skeletons and scaffolding for new studies

pub mod config;
pub mod error;
pub mod formatter;
pub mod literal;
pub mod project;
pub mod render;
pub mod splicer;
pub mod templates;

#[cfg(test)]
mod fixtures;

pub use config::{MaskingKeyConfig, StudyConfig};
pub use error::{GlimpseError, Result};
pub use formatter::{ConfigFormatter, FormatOptions, FormatStrategy, PubKeyYSource, RenderedFragment};
pub use render::{render, render_document, RenderOptions};
pub use splicer::SpliceMode;
