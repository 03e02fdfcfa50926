//! Study directory scaffolding for `glimpse init`.
//!
//! ## Directory layout
//!
//! ```text
//! <dir>/
//! ├── study.json         # the StudyConfig passed in
//! └── <Contract>.sol     # contract skeleton with marker regions
//! ```
//!
//! The skeleton is laid out for one [`FormatStrategy`]; rendering it with a
//! different strategy fails on the missing or unexpected marker regions.

use std::path::{Path, PathBuf};

use crate::config::StudyConfig;
use crate::error::{GlimpseError, Result};
use crate::formatter::FormatStrategy;
use crate::templates::embedded;
use crate::templates::renderer::TemplateRenderer;

pub const STUDY_FILE: &str = "study.json";

/// Paths written by [`scaffold_study`].
#[derive(Debug, Clone)]
pub struct ScaffoldedStudy {
    pub study: PathBuf,
    pub template: PathBuf,
}

/// Create `dir` holding `study` as JSON and a contract skeleton for `strategy`.
pub fn scaffold_study(
    dir: &Path,
    contract_name: &str,
    strategy: FormatStrategy,
    study: &StudyConfig,
) -> Result<ScaffoldedStudy> {
    if dir.exists() {
        return Err(GlimpseError::ProjectExists(dir.to_path_buf()));
    }

    // Render before touching the filesystem so a bad name leaves nothing behind.
    let skeleton =
        TemplateRenderer::new().render_contract(embedded::STUDY_CONTRACT, contract_name, strategy)?;

    std::fs::create_dir_all(dir)?;

    let study_path = dir.join(STUDY_FILE);
    study.save(&study_path)?;

    let template = dir.join(format!("{contract_name}.sol"));
    std::fs::write(&template, skeleton)?;

    tracing::info!(dir = %dir.display(), contract_name, "scaffolded study");
    Ok(ScaffoldedStudy {
        study: study_path,
        template,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{self, RenderOptions};

    #[test]
    fn test_scaffold_then_render() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("sleep");
        let paths = scaffold_study(
            &dir,
            "SleepStudy",
            FormatStrategy::IncrementalPush,
            &crate::fixtures::two_key_study(),
        )
        .unwrap();
        assert_eq!(paths.study, dir.join("study.json"));
        assert_eq!(paths.template, dir.join("SleepStudy.sol"));

        let out = render::render(&paths.study, &paths.template, &RenderOptions::default()).unwrap();
        assert!(out.contains("contract SleepStudy {"));
        assert!(out.contains("ZKP1.push(uint32(0x100));"));
    }

    #[test]
    fn test_scaffold_existing_dir() {
        let root = tempfile::tempdir().unwrap();
        let result = scaffold_study(
            root.path(),
            "S",
            FormatStrategy::default(),
            &StudyConfig::default(),
        );
        assert!(matches!(result, Err(GlimpseError::ProjectExists(_))));
    }

    #[test]
    fn test_scaffold_bad_name_leaves_nothing() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("bad");
        assert!(scaffold_study(&dir, "not-valid", FormatStrategy::default(), &StudyConfig::default()).is_err());
        assert!(!dir.exists());
    }

    #[test]
    fn test_scaffold_writes_given_study() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("custom");
        let study = StudyConfig {
            study_name: "Caffeine".into(),
            binary_questions: vec!["Coffee before noon?".into()],
            ..StudyConfig::default()
        };
        let paths = scaffold_study(&dir, "Caffeine", FormatStrategy::InlineArray, &study).unwrap();
        assert_eq!(StudyConfig::load(&paths.study).unwrap(), study);

        let options = RenderOptions {
            format: crate::formatter::FormatOptions {
                strategy: FormatStrategy::InlineArray,
                ..Default::default()
            },
            ..RenderOptions::default()
        };
        let out = render::render(&paths.study, &paths.template, &options).unwrap();
        assert!(out.contains("string constant STUDY_NAME = \"Caffeine\";"));
        assert!(!out.contains("My Study"));
    }
}
