//! Study configuration as read from the study JSON file.
//!
//! Every key is optional; absent keys fall back to the defaults documented on
//! each field. Field names on the wire are the upper-case keys used by the
//! study authoring tools (`STUDY_NAME`, `MASKING_KEYS`, ...).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GlimpseError, Result};

/// Placeholder merkle root used when `PARTICIPANT_MERKLE_ROOT` is absent.
pub const DEFAULT_MERKLE_ROOT: &str = "0x0000";

/// Placeholder public key coordinate used when `PubKey_X` / `PubKey_Y` is absent.
pub const DEFAULT_PUB_KEY: &str = "0x100";

/// A study description: metadata, deadline, questions and masking keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyConfig {
    #[serde(rename = "STUDY_NAME", default)]
    pub study_name: String,

    #[serde(rename = "STUDY_DESC", default)]
    pub study_desc: String,

    #[serde(rename = "HYPOTHESIS_DESC", default)]
    pub hypothesis_desc: String,

    #[serde(rename = "ANALYSIS_DESC", default)]
    pub analysis_desc: String,

    /// Numeric literal, embedded as a `uint256` constant. Default `0x0000`.
    #[serde(rename = "PARTICIPANT_MERKLE_ROOT", default = "default_merkle_root")]
    pub participant_merkle_root: String,

    /// Unix timestamp after which voting closes. Default `0`.
    #[serde(rename = "VOTING_DEADLINE", default)]
    pub voting_deadline: u64,

    /// Yes/no questions. Position in this list is the on-chain question index.
    #[serde(rename = "BINARY_QUESTIONS", default)]
    pub binary_questions: Vec<String>,

    #[serde(rename = "MASKING_KEYS", default)]
    pub masking_keys: Vec<MaskingKeyConfig>,
}

/// One masking key: a public key point plus its proof coefficients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskingKeyConfig {
    #[serde(rename = "PubKey_X", default = "default_pub_key")]
    pub pub_key_x: String,

    #[serde(rename = "PubKey_Y", default = "default_pub_key")]
    pub pub_key_y: String,

    /// Proof coefficients, in the order the on-chain verifier expects.
    #[serde(rename = "ZKP", default)]
    pub zkp: Vec<String>,
}

fn default_merkle_root() -> String {
    DEFAULT_MERKLE_ROOT.into()
}

fn default_pub_key() -> String {
    DEFAULT_PUB_KEY.into()
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            study_name: String::new(),
            study_desc: String::new(),
            hypothesis_desc: String::new(),
            analysis_desc: String::new(),
            participant_merkle_root: default_merkle_root(),
            voting_deadline: 0,
            binary_questions: Vec::new(),
            masking_keys: Vec::new(),
        }
    }
}

impl Default for MaskingKeyConfig {
    fn default() -> Self {
        Self {
            pub_key_x: default_pub_key(),
            pub_key_y: default_pub_key(),
            zkp: Vec::new(),
        }
    }
}

impl StudyConfig {
    /// Load a study from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| GlimpseError::ConfigNotFound {
                path: path.to_path_buf(),
                source: e,
            })?;
        serde_json::from_str(&contents).map_err(|e| GlimpseError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Parse a study from JSON text. Errors carry the placeholder path `<inline>`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GlimpseError::ConfigParse {
            path: "<inline>".into(),
            source: e,
        })
    }

    /// Write the study as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| GlimpseError::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
