//! Study to contract rendering pipeline.
//!
//! ```text
//! StudyConfig ──ConfigFormatter──► [RenderedFragment] ──splice_all(template)──► contract source
//! ```
//!
//! Every call builds its own formatter; nothing is cached between renders, so
//! independent studies can be rendered concurrently without coordination.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::StudyConfig;
use crate::error::{GlimpseError, Result};
use crate::formatter::{ConfigFormatter, FormatOptions, RenderedFragment};
use crate::splicer::{self, SpliceMode};

/// Options for a full render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    #[serde(flatten)]
    pub format: FormatOptions,
    pub splice_mode: SpliceMode,
}

/// Format a study without splicing it, returning the fragments.
///
/// Useful to validate a study before a template is at hand.
pub fn check(study: &StudyConfig, options: &RenderOptions) -> Result<Vec<RenderedFragment>> {
    ConfigFormatter::new(options.format).format(study)
}

/// Render a study into an in-memory template.
pub fn render_document(study: &StudyConfig, template: &str, options: &RenderOptions) -> Result<String> {
    tracing::info!(
        strategy = options.format.strategy.as_str(),
        questions = study.binary_questions.len(),
        masking_keys = study.masking_keys.len(),
        "formatting study"
    );
    let fragments = check(study, options)?;

    tracing::info!(regions = fragments.len(), "splicing fragments into template");
    splicer::splice_all(template, &fragments, options.splice_mode)
}

/// Load a study JSON file and a template file, and render them.
pub fn render(config_path: &Path, template_path: &Path, options: &RenderOptions) -> Result<String> {
    let study = StudyConfig::load(config_path)?;
    let template =
        std::fs::read_to_string(template_path).map_err(|e| GlimpseError::TemplateNotFound {
            path: template_path.to_path_buf(),
            source: e,
        })?;
    tracing::debug!(
        config = %config_path.display(),
        template = %template_path.display(),
        "loaded study and template"
    );
    render_document(&study, &template, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MaskingKeyConfig;
    use crate::formatter::{FormatStrategy, PubKeyYSource};
    use crate::templates::embedded;
    use crate::templates::renderer::TemplateRenderer;

    const TWO_REGION: &str = "pragma solidity ^0.8.0;\n\ncontract Study {\n    \
        /* START META INFORMATION */\n    /* END META INFORMATION */\n\n    constructor() {\n    \
        /* START CONSTRUCTOR INFORMATION */\n    /* END CONSTRUCTOR INFORMATION */\n    }\n}\n";

    const META_ONLY: &str = "contract Study {\n    /* START META INFORMATION */\n    /* END META INFORMATION */\n}\n";

    fn options(strategy: FormatStrategy) -> RenderOptions {
        RenderOptions {
            format: FormatOptions {
                strategy,
                ..FormatOptions::default()
            },
            ..RenderOptions::default()
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let study = crate::fixtures::two_key_study();
        let opts = RenderOptions::default();
        let a = render_document(&study, TWO_REGION, &opts).unwrap();
        let b = render_document(&study, TWO_REGION, &opts).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_render_empty_study() {
        let study = StudyConfig::from_json_str("{}").unwrap();
        let out = render_document(&study, TWO_REGION, &RenderOptions::default()).unwrap();
        assert!(out.contains("string constant STUDY_NAME = \"\";"));
        assert!(out.contains("uint256 constant PARTICIPANT_MERKLE_ROOT = 0x0000;"));
        assert!(out.contains("uint constant VOTING_DEADLINE = 0;"));
        assert!(out.contains(
            "/* START CONSTRUCTOR INFORMATION */\n\n    /* END CONSTRUCTOR INFORMATION */"
        ));
    }

    #[test]
    fn test_inline_strategy_needs_only_meta() {
        let out = render_document(
            &crate::fixtures::two_key_study(),
            META_ONLY,
            &options(FormatStrategy::InlineArray),
        )
        .unwrap();
        assert!(out.contains("uint32[2] ZKP0 = [uint32(0x100), uint32(0x100)];"));
        assert!(out.contains("uint32[2] ZKP1 = [uint32(0x100), uint32(0x100)];"));
    }

    #[test]
    fn test_push_strategy_requires_constructor_region() {
        let err = render_document(&crate::fixtures::two_key_study(), META_ONLY, &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, GlimpseError::MissingMarker { ref marker, .. }
            if marker == "CONSTRUCTOR INFORMATION"));
    }

    #[test]
    fn test_masking_key_round_trip_both_strategies() {
        let study = StudyConfig {
            masking_keys: vec![MaskingKeyConfig {
                pub_key_x: "0xAA".into(),
                pub_key_y: "0xBB".into(),
                zkp: vec!["1".into(), "2".into()],
            }],
            ..StudyConfig::default()
        };
        let with_y = |strategy| RenderOptions {
            format: FormatOptions {
                strategy,
                pub_key_y: PubKeyYSource::PubKeyY,
                ..FormatOptions::default()
            },
            ..RenderOptions::default()
        };

        let pushed = render_document(&study, TWO_REGION, &with_y(FormatStrategy::IncrementalPush)).unwrap();
        assert_eq!(pushed.matches("MaskingKey(uint256(0xAA), uint256(0xBB), ZKP0)").count(), 1);
        let one = pushed.find("ZKP0.push(uint32(1));").unwrap();
        let two = pushed.find("ZKP0.push(uint32(2));").unwrap();
        assert!(one < two);

        let inline = render_document(&study, META_ONLY, &with_y(FormatStrategy::InlineArray)).unwrap();
        assert_eq!(inline.matches("MaskingKey(uint256(0xAA), uint256(0xBB), ZKP0)").count(), 1);
        assert!(inline.contains("uint32[2] ZKP0 = [uint32(1), uint32(2)];"));
    }

    #[test]
    fn test_marker_text_in_study_values() {
        let study = StudyConfig {
            study_name: "see /* START CONSTRUCTOR INFORMATION */ docs".into(),
            binary_questions: vec!["Is /* END META INFORMATION */ a marker?".into()],
            ..crate::fixtures::two_key_study()
        };
        for strategy in [FormatStrategy::IncrementalPush, FormatStrategy::Hybrid] {
            for splice_mode in [SpliceMode::Strict, SpliceMode::FirstOccurrence] {
                let opts = RenderOptions {
                    splice_mode,
                    ..options(strategy)
                };
                let out = render_document(&study, TWO_REGION, &opts).unwrap();
                assert!(out.contains(
                    "string constant STUDY_NAME = \"see /* START CONSTRUCTOR INFORMATION */ docs\";"
                ));
                assert!(out.contains("string constant STUDY_DESC = \"Description of study.\";"));
                assert!(out.contains("BinaryQuestion(\"Is /* END META INFORMATION */ a marker?\")"));
                assert!(out.contains("constructor() {"));
                assert!(out.ends_with("    /* END CONSTRUCTOR INFORMATION */\n    }\n}\n"));

                let mut reversed = check(&study, &opts).unwrap();
                reversed.reverse();
                assert_eq!(splicer::splice_all(TWO_REGION, &reversed, splice_mode).unwrap(), out);
            }
        }
    }

    #[test]
    fn test_render_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let study_path = dir.path().join("study.json");
        let template_path = dir.path().join("Study.sol");
        crate::fixtures::two_key_study().save(&study_path).unwrap();
        std::fs::write(&template_path, TWO_REGION).unwrap();

        let out = render(&study_path, &template_path, &RenderOptions::default()).unwrap();
        assert!(out.contains("string constant STUDY_NAME = \"My Study\";"));
        assert!(out.contains("BinaryQuestions.push(BinaryQuestion(\"Question 2?\"));"));
        assert!(out.contains("uint constant VOTING_DEADLINE = 1635551999;"));
    }

    #[test]
    fn test_render_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let study_path = dir.path().join("study.json");
        StudyConfig::default().save(&study_path).unwrap();
        let err = render(
            &study_path,
            &dir.path().join("missing.sol"),
            &RenderOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GlimpseError::TemplateNotFound { .. }));
    }

    #[test]
    fn test_embedded_contract_renders_for_every_strategy() {
        let renderer = TemplateRenderer::new();
        for strategy in [
            FormatStrategy::IncrementalPush,
            FormatStrategy::InlineArray,
            FormatStrategy::Hybrid,
        ] {
            let skeleton = renderer
                .render_contract(embedded::STUDY_CONTRACT, "StudyVoting", strategy)
                .unwrap();
            let out = render_document(&crate::fixtures::two_key_study(), &skeleton, &options(strategy)).unwrap();
            assert!(out.contains("contract StudyVoting"));
            assert!(out.contains("string constant STUDY_NAME = \"My Study\";"));
        }
    }

    #[test]
    fn test_options_from_json() {
        let opts: RenderOptions = serde_json::from_str(
            r#"{"strategy": "hybrid", "literals": "escape", "splice_mode": "first-occurrence"}"#,
        )
        .unwrap();
        assert_eq!(opts.format.strategy, FormatStrategy::Hybrid);
        assert_eq!(opts.format.literals, crate::literal::LiteralPolicy::Escape);
        assert_eq!(opts.format.pub_key_y, PubKeyYSource::MirrorX);
        assert_eq!(opts.splice_mode, SpliceMode::FirstOccurrence);
    }
}
