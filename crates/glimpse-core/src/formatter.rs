//! Study configuration to contract source fragments.
//!
//! A study renders into one or two fragments, each targeting a marker region of
//! the contract template:
//!
//! - `META INFORMATION`: storage declarations and constants
//! - `CONSTRUCTOR INFORMATION`: statements run in the constructor body
//!
//! Three layouts are supported, selected with [`FormatStrategy`]:
//!
//! ```text
//! IncrementalPush  META: MaskingKeys decl, constants, `uint32[] ZKP<i>;`
//!                  CTOR: ZKP<i>.push(..), MaskingKeys.push(..), BinaryQuestions.push(..)
//! InlineArray      META: constants, `uint32[n] ZKP<i> = [..]`, MaskingKeys = [..], BinaryQuestions = [..]
//! Hybrid           META: MaskingKeys decl, constants, `uint32[n] ZKP<i> = [..]`, BinaryQuestions = [..]
//!                  CTOR: MaskingKeys.push(..)
//! ```
//!
//! Output is a pure function of the study and the options: identical input
//! always yields byte-identical fragments.

use serde::{Deserialize, Serialize};

use crate::config::StudyConfig;
use crate::error::Result;
use crate::literal::{self, LiteralPolicy, UintWidth};

/// Marker name of the storage/constants region.
pub const META_INFORMATION: &str = "META INFORMATION";

/// Marker name of the constructor body region.
pub const CONSTRUCTOR_INFORMATION: &str = "CONSTRUCTOR INFORMATION";

/// Generated text destined for one marker region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFragment {
    pub marker: String,
    pub text: String,
}

impl RenderedFragment {
    fn new(marker: &str, text: String) -> Self {
        Self {
            marker: marker.to_string(),
            text,
        }
    }
}

/// How masking keys and questions are laid out in the contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatStrategy {
    /// Dynamic arrays filled by `push` calls in the constructor.
    #[default]
    IncrementalPush,
    /// Everything initialized inline in the META region.
    InlineArray,
    /// Inline proof arrays and questions, masking keys pushed in the constructor.
    Hybrid,
}

impl FormatStrategy {
    /// Resolve a strategy by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "incremental-push" => Some(Self::IncrementalPush),
            "inline-array" => Some(Self::InlineArray),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IncrementalPush => "incremental-push",
            Self::InlineArray => "inline-array",
            Self::Hybrid => "hybrid",
        }
    }

    /// Marker regions a template must provide for this strategy, in splice order.
    pub fn markers(&self) -> &'static [&'static str] {
        match self {
            Self::InlineArray => &[META_INFORMATION],
            Self::IncrementalPush | Self::Hybrid => &[META_INFORMATION, CONSTRUCTOR_INFORMATION],
        }
    }
}

/// Which value lands in the Y position of each `MaskingKey(...)` literal.
///
/// Contracts deployed so far were generated with the X coordinate in both
/// positions, so `MirrorX` stays the default until those templates are retired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PubKeyYSource {
    #[default]
    MirrorX,
    PubKeyY,
}

impl PubKeyYSource {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mirror-x" => Some(Self::MirrorX),
            "pub-key-y" => Some(Self::PubKeyY),
            _ => None,
        }
    }
}

/// Knobs for [`ConfigFormatter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub strategy: FormatStrategy,
    pub literals: LiteralPolicy,
    pub pub_key_y: PubKeyYSource,
}

/// Study values already rendered as literals.
struct StudyLiterals {
    study_name: String,
    study_desc: String,
    hypothesis_desc: String,
    analysis_desc: String,
    merkle_root: String,
    voting_deadline: u64,
    questions: Vec<String>,
    keys: Vec<KeyLiterals>,
}

struct KeyLiterals {
    x: String,
    y: String,
    zkp: Vec<String>,
}

impl KeyLiterals {
    fn struct_literal(&self, index: usize) -> String {
        format!(
            "MaskingKey(uint256({}), uint256({}), ZKP{index})",
            self.x, self.y
        )
    }

    fn inline_array(&self, index: usize) -> String {
        let coefficients: Vec<String> = self.zkp.iter().map(|c| format!("uint32({c})")).collect();
        format!(
            "    uint32[{}] ZKP{index} = [{}];\n",
            self.zkp.len(),
            coefficients.join(", ")
        )
    }
}

/// Formats a [`StudyConfig`] into contract source fragments.
#[derive(Debug, Clone, Default)]
pub struct ConfigFormatter {
    options: FormatOptions,
}

impl ConfigFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Render the study into the fragments required by the configured strategy.
    ///
    /// Fragments come back in the order of [`FormatStrategy::markers`].
    pub fn format(&self, study: &StudyConfig) -> Result<Vec<RenderedFragment>> {
        let lits = self.literals(study)?;

        let fragments = match self.options.strategy {
            FormatStrategy::IncrementalPush => vec![
                RenderedFragment::new(META_INFORMATION, push_meta(&lits)),
                RenderedFragment::new(CONSTRUCTOR_INFORMATION, push_constructor(&lits)),
            ],
            FormatStrategy::InlineArray => {
                vec![RenderedFragment::new(META_INFORMATION, inline_meta(&lits))]
            }
            FormatStrategy::Hybrid => vec![
                RenderedFragment::new(META_INFORMATION, hybrid_meta(&lits)),
                RenderedFragment::new(CONSTRUCTOR_INFORMATION, hybrid_constructor(&lits)),
            ],
        };

        for fragment in &fragments {
            tracing::debug!(
                marker = %fragment.marker,
                bytes = fragment.text.len(),
                "formatted fragment"
            );
        }
        Ok(fragments)
    }

    fn literals(&self, study: &StudyConfig) -> Result<StudyLiterals> {
        let policy = self.options.literals;
        let string = |field: &str, value: &str| literal::string_literal(field, value, policy);

        let questions = study
            .binary_questions
            .iter()
            .enumerate()
            .map(|(i, q)| string(&format!("BINARY_QUESTIONS[{i}]"), q))
            .collect::<Result<Vec<_>>>()?;

        let mut keys = Vec::with_capacity(study.masking_keys.len());
        for (i, key) in study.masking_keys.iter().enumerate() {
            let x = literal::uint_literal(
                &format!("MASKING_KEYS[{i}].PubKey_X"),
                &key.pub_key_x,
                UintWidth::U256,
                policy,
            )?;
            let y = literal::uint_literal(
                &format!("MASKING_KEYS[{i}].PubKey_Y"),
                &key.pub_key_y,
                UintWidth::U256,
                policy,
            )?;
            let zkp = key
                .zkp
                .iter()
                .enumerate()
                .map(|(j, c)| {
                    literal::uint_literal(
                        &format!("MASKING_KEYS[{i}].ZKP[{j}]"),
                        c,
                        UintWidth::U32,
                        policy,
                    )
                })
                .collect::<Result<Vec<_>>>()?;

            let y = match self.options.pub_key_y {
                PubKeyYSource::PubKeyY => y,
                PubKeyYSource::MirrorX => {
                    if x != y {
                        tracing::warn!(
                            key = i,
                            "PubKey_Y differs from PubKey_X but is replaced by X (pub_key_y = mirror-x)"
                        );
                    }
                    x.clone()
                }
            };
            keys.push(KeyLiterals { x, y, zkp });
        }

        Ok(StudyLiterals {
            study_name: string("STUDY_NAME", &study.study_name)?,
            study_desc: string("STUDY_DESC", &study.study_desc)?,
            hypothesis_desc: string("HYPOTHESIS_DESC", &study.hypothesis_desc)?,
            analysis_desc: string("ANALYSIS_DESC", &study.analysis_desc)?,
            merkle_root: literal::uint_literal(
                "PARTICIPANT_MERKLE_ROOT",
                &study.participant_merkle_root,
                UintWidth::U256,
                policy,
            )?,
            voting_deadline: study.voting_deadline,
            questions,
            keys,
        })
    }
}

fn constants(lits: &StudyLiterals) -> String {
    format!(
        "    // STUDY_NAME
    string constant STUDY_NAME = {};

    // STUDY_DESC
    string constant STUDY_DESC = {};

    // HYPOTHESIS_DESC
    string constant HYPOTHESIS_DESC = {};

    // ANALYSIS_DESC
    string constant ANALYSIS_DESC = {};

    // PARTICIPANT_MERKLE_ROOT
    uint256 constant PARTICIPANT_MERKLE_ROOT = {};

    // VOTING_DEADLINE
    uint constant VOTING_DEADLINE = {};
",
        lits.study_name,
        lits.study_desc,
        lits.hypothesis_desc,
        lits.analysis_desc,
        lits.merkle_root,
        lits.voting_deadline,
    )
}

fn question_list(lits: &StudyLiterals) -> String {
    let items: Vec<String> = lits
        .questions
        .iter()
        .map(|q| format!("BinaryQuestion({q})"))
        .collect();
    format!(
        "    BinaryQuestion[] public BinaryQuestions = [{}];\n",
        items.join(", ")
    )
}

fn push_meta(lits: &StudyLiterals) -> String {
    let mut out = String::from("\n    MaskingKey[] public MaskingKeys;\n\n");
    out.push_str(&constants(lits));
    out.push_str("\n    // MASKING_KEY_PROOFS\n");
    for i in 0..lits.keys.len() {
        out.push_str(&format!("    uint32[] ZKP{i};\n"));
    }
    out
}

fn push_constructor(lits: &StudyLiterals) -> String {
    let mut out = String::new();
    for (i, key) in lits.keys.iter().enumerate() {
        for c in &key.zkp {
            out.push_str(&format!("        ZKP{i}.push(uint32({c}));\n"));
        }
    }
    out.push_str(&masking_key_pushes(lits));
    for q in &lits.questions {
        out.push_str(&format!(
            "\n        BinaryQuestions.push(BinaryQuestion({q}));"
        ));
    }
    out
}

fn masking_key_pushes(lits: &StudyLiterals) -> String {
    lits.keys
        .iter()
        .enumerate()
        .map(|(i, key)| format!("        MaskingKeys.push({});\n", key.struct_literal(i)))
        .collect()
}

fn inline_meta(lits: &StudyLiterals) -> String {
    let mut out = String::from("\n");
    out.push_str(&constants(lits));
    out.push_str("\n    // MASKING_KEY_PROOFS\n");
    for (i, key) in lits.keys.iter().enumerate() {
        out.push_str(&key.inline_array(i));
    }
    let structs: Vec<String> = lits
        .keys
        .iter()
        .enumerate()
        .map(|(i, key)| key.struct_literal(i))
        .collect();
    out.push_str(&format!(
        "\n    MaskingKey[] public MaskingKeys = [{}];\n",
        structs.join(", ")
    ));
    out.push_str(&question_list(lits));
    out
}

fn hybrid_meta(lits: &StudyLiterals) -> String {
    let mut out = String::from("\n    MaskingKey[] public MaskingKeys;\n\n");
    out.push_str(&constants(lits));
    out.push_str("\n    // MASKING_KEY_PROOFS\n");
    for (i, key) in lits.keys.iter().enumerate() {
        out.push_str(&key.inline_array(i));
    }
    out.push('\n');
    out.push_str(&question_list(lits));
    out
}

fn hybrid_constructor(lits: &StudyLiterals) -> String {
    masking_key_pushes(lits)
}
