//! Unified error types for the glimpse toolkit.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which half of a marker pair is absent from a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    End,
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("START"),
            Self::End => f.write_str("END"),
        }
    }
}

/// Why a marker pair cannot be used as a splice region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// The END marker appears before the START marker.
    EndBeforeStart,
    /// The START marker appears more than once.
    DuplicateStart,
    /// The END marker appears more than once.
    DuplicateEnd,
    /// The region overlaps another region being spliced in the same pass.
    Overlapping,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndBeforeStart => f.write_str("END marker precedes START marker"),
            Self::DuplicateStart => f.write_str("START marker appears more than once"),
            Self::DuplicateEnd => f.write_str("END marker appears more than once"),
            Self::Overlapping => f.write_str("region overlaps another marker region"),
        }
    }
}

/// All errors that can occur while loading, formatting, or splicing a study.
#[derive(Error, Debug)]
pub enum GlimpseError {
    // --- Configuration ---

    /// The study configuration file was not found or could not be read.
    #[error("study config not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The study configuration exists but is not valid study JSON.
    #[error("failed to parse study config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The study could not be serialized for writing.
    #[error("failed to serialize study config for {path}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- Formatting ---

    /// A configuration value would not form a valid contract literal.
    #[error("invalid literal for {field}: {reason} (value: {value:?})")]
    InvalidLiteral {
        field: String,
        value: String,
        reason: String,
    },

    // --- Splicing ---

    /// The contract template file was not found or could not be read.
    #[error("template not found at {path}")]
    TemplateNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A START or END marker required for a fragment is absent from the template.
    #[error("missing {kind} marker for region '{marker}'")]
    MissingMarker { marker: String, kind: MarkerKind },

    /// The marker pair exists but cannot delimit a single region.
    #[error("malformed markers for region '{marker}': {reason}")]
    MalformedMarker {
        marker: String,
        reason: MalformedReason,
    },

    // --- Scaffolding ---

    /// Handlebars template rendering failed (invalid template or missing variables).
    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    /// Attempted to scaffold a study into a directory that already exists.
    #[error("directory already exists: {0}")]
    ProjectExists(PathBuf),

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, GlimpseError>`.
pub type Result<T> = std::result::Result<T, GlimpseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_marker_message() {
        let err = GlimpseError::MissingMarker {
            marker: "META INFORMATION".into(),
            kind: MarkerKind::End,
        };
        assert_eq!(
            err.to_string(),
            "missing END marker for region 'META INFORMATION'"
        );
    }

    #[test]
    fn test_invalid_literal_names_field() {
        let err = GlimpseError::InvalidLiteral {
            field: "MASKING_KEYS[0].ZKP[1]".into(),
            value: "abc".into(),
            reason: "not a numeric literal".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("MASKING_KEYS[0].ZKP[1]"));
        assert!(msg.contains("\"abc\""));
    }

    #[test]
    fn test_config_write_is_not_a_parse_error() {
        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let err = GlimpseError::ConfigWrite {
            path: "study.json".into(),
            source,
        };
        assert_eq!(err.to_string(), "failed to serialize study config for study.json");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume");
        let err = GlimpseError::from(io);
        assert!(matches!(err, GlimpseError::Io(_)));
        assert_eq!(err.to_string(), "read-only volume");
    }
}
