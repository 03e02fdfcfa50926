//! Shared study values for unit tests.

use crate::config::{MaskingKeyConfig, StudyConfig};

/// Two questions, two identical masking keys with two proof coefficients each.
pub(crate) fn two_key_study() -> StudyConfig {
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
