//! Contract literal formatting with optional validation.
//!
//! Study values are spliced straight into contract source, so a stray quote in
//! a question or a typo in a key coordinate turns into a compile error far away
//! from its cause. [`LiteralPolicy`] decides what happens to such values:
//!
//! | Policy | strings | numbers |
//! |---|---|---|
//! | `Strict` | reject `"`, `\`, control and non-ASCII characters | validate grammar and range |
//! | `Escape` | escape them (`\"`, `\\`, `\n`, `\xNN`) | validate grammar and range |
//! | `Verbatim` | embed as given | embed as given |
//!
//! Number grammar follows the contract language: decimal without leading zeros
//! or `0x` hex, optionally grouped with single underscores between digits.

use std::fmt::Write as _;

use num_bigint::BigUint;
use num_traits::Num;
use serde::{Deserialize, Serialize};

use crate::error::{GlimpseError, Result};

/// How configuration values are checked before being embedded as literals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LiteralPolicy {
    /// Reject anything that would not survive as a literal.
    #[default]
    Strict,
    /// Escape string values, validate numeric ones.
    Escape,
    /// Embed every value exactly as given.
    Verbatim,
}

impl LiteralPolicy {
    /// Resolve a policy by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "strict" => Some(Self::Strict),
            "escape" => Some(Self::Escape),
            "verbatim" => Some(Self::Verbatim),
            _ => None,
        }
    }
}

/// Unsigned integer width a numeric literal must fit into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UintWidth {
    U32,
    U256,
}

impl UintWidth {
    pub fn bits(self) -> u64 {
        match self {
            Self::U32 => 32,
            Self::U256 => 256,
        }
    }

    fn type_name(self) -> &'static str {
        match self {
            Self::U32 => "uint32",
            Self::U256 => "uint256",
        }
    }
}

/// Format `value` as a double-quoted string literal.
pub fn string_literal(field: &str, value: &str, policy: LiteralPolicy) -> Result<String> {
    match policy {
        LiteralPolicy::Verbatim => Ok(format!("\"{value}\"")),
        LiteralPolicy::Escape => Ok(format!("\"{}\"", escape(value))),
        LiteralPolicy::Strict => {
            if let Some((pos, c)) = value.char_indices().find(|(_, c)| !is_plain(*c)) {
                return Err(invalid(
                    field,
                    value,
                    format!("character {c:?} at byte {pos} cannot appear unescaped in a string literal"),
                ));
            }
            Ok(format!("\"{value}\""))
        }
    }
}

/// Check that `value` is an unsigned literal fitting `width` and return it unchanged.
pub fn uint_literal(
    field: &str,
    value: &str,
    width: UintWidth,
    policy: LiteralPolicy,
) -> Result<String> {
    if policy == LiteralPolicy::Verbatim {
        return Ok(value.to_string());
    }
    let n = parse_uint(value).map_err(|reason| invalid(field, value, reason))?;
    if n.bits() > width.bits() {
        return Err(invalid(
            field,
            value,
            format!("value does not fit in {}", width.type_name()),
        ));
    }
    Ok(value.to_string())
}

/// Printable ASCII other than the quote and backslash.
fn is_plain(c: char) -> bool {
    (' '..='~').contains(&c) && c != '"' && c != '\\'
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if is_plain(c) => out.push(c),
            c => {
                let mut buf = [0u8; 4];
                for b in c.encode_utf8(&mut buf).bytes() {
                    // Writing to a String cannot fail.
                    let _ = write!(out, "\\x{b:02x}");
                }
            }
        }
    }
    out
}

/// Parse a decimal or `0x` hex literal, honouring `_` digit separators.
fn parse_uint(value: &str) -> std::result::Result<BigUint, String> {
    let (digits, radix) = match value.strip_prefix("0x") {
        Some(rest) => (rest, 16),
        None => (value, 10),
    };
    if digits.is_empty() {
        return Err("empty numeric literal".into());
    }
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return Err("misplaced '_' separator".into());
    }
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if let Some(c) = cleaned.chars().find(|c| !c.is_digit(radix)) {
        return Err(format!("unexpected character {c:?} in numeric literal"));
    }
    if radix == 10 && cleaned.len() > 1 && cleaned.starts_with('0') {
        return Err("decimal literal has a leading zero".into());
    }
    BigUint::from_str_radix(&cleaned, radix).map_err(|e| format!("invalid numeric literal: {e}"))
}

fn invalid(field: &str, value: &str, reason: impl Into<String>) -> GlimpseError {
    GlimpseError::InvalidLiteral {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}
