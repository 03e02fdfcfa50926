use std::io::IsTerminal;
use std::path::Path;

use anyhow::Result;
use dialoguer::Select;

use glimpse_core::project;
use glimpse_core::{FormatStrategy, MaskingKeyConfig, StudyConfig};

use crate::output;
use crate::StrategyChoice;

/// Scaffold a new study directory.
///
/// Writes a sample `study.json` and a contract skeleton laid out for the chosen
/// strategy. If no strategy is given and stdin is a terminal, prompts for one;
/// otherwise falls back to `incremental-push`.
pub fn run(dir: &Path, contract_name: &str, strategy: Option<StrategyChoice>) -> Result<()> {
    output::print_header(&format!("glimpse init: {}", dir.display()));

    let strategy = match strategy {
        Some(s) => s.to_strategy(),
        None if std::io::stdin().is_terminal() => prompt_strategy()?,
        None => FormatStrategy::default(),
    };

    output::print_step(1, 2, &format!("Rendering {contract_name} skeleton ({})", strategy.as_str()));
    output::print_step(2, 2, "Writing study files");
    let paths = project::scaffold_study(dir, contract_name, strategy, &sample_study())?;

    output::print_success(&format!("Study scaffolded in {}", dir.display()));
    output::print_key_value("Study", &paths.study.display().to_string());
    output::print_key_value("Template", &paths.template.display().to_string());
    eprintln!();
    eprintln!("  Next steps:");
    eprintln!("    cd {}", dir.display());
    eprintln!("    glimpse check --strategy {}", strategy.as_str());
    eprintln!(
        "    glimpse render --strategy {} --template {contract_name}.sol --output {contract_name}.gen.sol",
        strategy.as_str()
    );
    eprintln!();

    Ok(())
}

/// Placeholder study written by `glimpse init`: two questions and two masking
/// keys, so every region of the skeleton receives content.
pub fn sample_study() -> StudyConfig {
    let key = MaskingKeyConfig {
        pub_key_x: "0x100".into(),
        pub_key_y: "0x100".into(),
        zkp: vec!["0x100".into(), "0x100".into()],
    };
    StudyConfig {
        study_name: "My Study".into(),
        study_desc: "Description of study.".into(),
        hypothesis_desc: "Hypothesis of study.".into(),
        analysis_desc: "Analysis description.".into(),
        participant_merkle_root: "0x000000000000000000000000".into(),
        voting_deadline: 1_635_551_999,
        binary_questions: vec!["Question 1?".into(), "Question 2?".into()],
        masking_keys: vec![key.clone(), key],
    }
}

fn prompt_strategy() -> Result<FormatStrategy> {
    let options = [
        FormatStrategy::IncrementalPush,
        FormatStrategy::InlineArray,
        FormatStrategy::Hybrid,
    ];
    let descriptions = &[
        "incremental-push: proofs, keys and questions pushed in the constructor",
        "inline-array: everything initialized in storage declarations",
        "hybrid: inline proofs and questions, keys pushed in the constructor",
    ];

    let selection = Select::new()
        .with_prompt("Select contract layout")
        .items(descriptions)
        .default(0)
        .interact()?;

    Ok(options[selection])
}
