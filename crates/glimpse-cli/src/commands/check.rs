use std::path::Path;

use anyhow::Result;

use glimpse_core::{render, RenderOptions, StudyConfig};

use crate::output;

/// Validate a study without a template.
///
/// Formats every value under the selected literal policy and lists the marker
/// regions the template will need to provide.
pub fn run(study_path: &Path, options: &RenderOptions) -> Result<()> {
    output::print_header("glimpse check");

    let study = StudyConfig::load(study_path)?;
    output::print_key_value("Study", &study_path.display().to_string());
    output::print_key_value("Questions", &study.binary_questions.len().to_string());
    output::print_key_value("Masking keys", &study.masking_keys.len().to_string());

    let fragments = render::check(&study, options)?;
    for fragment in &fragments {
        output::print_key_value(
            &fragment.marker,
            &format!("{} bytes, {} lines", fragment.text.len(), fragment.text.lines().count()),
        );
    }

    if study.masking_keys.iter().any(|k| k.pub_key_x != k.pub_key_y)
        && options.format.pub_key_y == glimpse_core::PubKeyYSource::MirrorX
    {
        output::print_warning("PubKey_Y values are ignored (--pub-key-y mirror-x)");
    }

    output::print_success(&format!(
        "Study is valid for the {} layout",
        options.format.strategy.as_str()
    ));
    Ok(())
}
