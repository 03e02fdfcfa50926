use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use glimpse_core::{RenderOptions, SpliceMode};

use crate::output;

/// Render a study into a contract template.
///
/// Without `--output` the contract is streamed to stdout and nothing else is
/// printed there. With `--output` the file is written and its SHA-256 reported,
/// so two renders of the same study can be compared at a glance.
pub fn run(
    study_path: &Path,
    template_path: &Path,
    output_path: Option<&Path>,
    options: &RenderOptions,
) -> Result<()> {
    if options.splice_mode == SpliceMode::FirstOccurrence {
        output::print_warning("legacy markers: duplicate START/END markers are ignored");
    }

    tracing::debug!(?options, "render options");
    let contract = glimpse_core::render(study_path, template_path, options)?;

    match output_path {
        None => {
            std::io::stdout()
                .write_all(contract.as_bytes())
                .context("failed to write contract to stdout")?;
        }
        Some(path) => {
            output::print_header("glimpse render");
            std::fs::write(path, &contract)
                .with_context(|| format!("failed to write {}", path.display()))?;
            output::print_success(&format!("Contract written to {}", path.display()));
            output::print_key_value("Layout", options.format.strategy.as_str());
            output::print_key_value("Size", &format!("{} bytes", contract.len()));
            output::print_key_value("SHA-256", &digest(&contract));
        }
    }

    Ok(())
}

fn digest(contract: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contract.as_bytes());
    hex::encode(hasher.finalize())
}
