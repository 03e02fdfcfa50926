//! Marker-delimited region replacement.
//!
//! A template marks each generated region with a pair of comments:
//!
//! ```text
//! /* START META INFORMATION */
//!     ...anything, discarded on splice...
//!     /* END META INFORMATION */
//! ```
//!
//! Splicing replaces everything strictly between the two markers with
//! `"\n" + fragment + "\n    "`. That whitespace is part of the output format:
//! generated contracts are diffed against each other and must not drift.
//!
//! Markers are located by a single scan over the document that feeds every
//! START/END occurrence, in document order, through a small state machine.
//! Duplicates and reversed pairs are therefore caught structurally instead of
//! being resolved by whichever occurrence a substring search happens to hit.

use serde::{Deserialize, Serialize};

use crate::error::{GlimpseError, MalformedReason, MarkerKind, Result};
use crate::formatter::RenderedFragment;

/// How strictly marker pairs are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpliceMode {
    /// Every marker must appear exactly once, START before END.
    #[default]
    Strict,
    /// Use the first START and first END, ignoring later duplicates.
    /// Matches templates produced for the first generation of study contracts.
    FirstOccurrence,
}

/// Byte offsets of a marker pair within a document.
///
/// `start..content_start` is the START token, `content_end..end` the END token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: usize,
    pub content_start: usize,
    pub content_end: usize,
    pub end: usize,
}

impl Region {
    fn overlaps(&self, other: &Region) -> bool {
        self.start < other.end && other.start < self.end
    }
}

pub fn start_token(marker: &str) -> String {
    format!("/* START {marker} */")
}

pub fn end_token(marker: &str) -> String {
    format!("/* END {marker} */")
}

#[derive(Debug, Clone, Copy)]
enum Event {
    Start(usize),
    End(usize),
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    BeforeStart,
    InRegion { start: usize },
    Closed { start: usize, end: usize },
}

/// Find the region delimited by `marker` in `document`.
pub fn locate(document: &str, marker: &str, mode: SpliceMode) -> Result<Region> {
    let start_tok = start_token(marker);
    let end_tok = end_token(marker);

    let mut events: Vec<Event> = document
        .match_indices(start_tok.as_str())
        .map(|(i, _)| Event::Start(i))
        .chain(
            document
                .match_indices(end_tok.as_str())
                .map(|(i, _)| Event::End(i)),
        )
        .collect();
    events.sort_by_key(|e| match e {
        Event::Start(i) | Event::End(i) => *i,
    });

    let malformed = |reason| GlimpseError::MalformedMarker {
        marker: marker.to_string(),
        reason,
    };
    let missing = |kind| GlimpseError::MissingMarker {
        marker: marker.to_string(),
        kind,
    };

    let mut state = ScanState::BeforeStart;
    for event in events {
        state = match (state, event) {
            (ScanState::BeforeStart, Event::Start(i)) => ScanState::InRegion { start: i },
            (ScanState::BeforeStart, Event::End(_)) => {
                return Err(malformed(MalformedReason::EndBeforeStart))
            }
            (ScanState::InRegion { start }, Event::End(i)) => ScanState::Closed { start, end: i },
            (ScanState::InRegion { start }, Event::Start(_)) => match mode {
                SpliceMode::Strict => return Err(malformed(MalformedReason::DuplicateStart)),
                SpliceMode::FirstOccurrence => ScanState::InRegion { start },
            },
            (closed @ ScanState::Closed { .. }, event) => match (mode, event) {
                (SpliceMode::Strict, Event::Start(_)) => {
                    return Err(malformed(MalformedReason::DuplicateStart))
                }
                (SpliceMode::Strict, Event::End(_)) => {
                    return Err(malformed(MalformedReason::DuplicateEnd))
                }
                (SpliceMode::FirstOccurrence, _) => closed,
            },
        };
    }

    match state {
        ScanState::BeforeStart => Err(missing(MarkerKind::Start)),
        ScanState::InRegion { .. } => Err(missing(MarkerKind::End)),
        ScanState::Closed { start, end } => {
            let region = Region {
                start,
                content_start: start + start_tok.len(),
                content_end: end,
                end: end + end_tok.len(),
            };
            tracing::debug!(marker, ?region, "located marker region");
            Ok(region)
        }
    }
}

/// Replace the contents of the `marker` region with `replacement`.
pub fn splice(document: &str, marker: &str, replacement: &str, mode: SpliceMode) -> Result<String> {
    let region = locate(document, marker, mode)?;
    let mut out = document.to_string();
    replace_region(&mut out, &region, replacement);
    Ok(out)
}

fn replace_region(document: &mut String, region: &Region, replacement: &str) {
    document.replace_range(
        region.content_start..region.content_end,
        &format!("\n{replacement}\n    "),
    );
}

/// Apply each fragment to its region.
///
/// Every region is located once on the unmodified template, then filled from
/// the last to the first by byte offset. Generated text is never scanned for
/// markers, so a study value that happens to contain a marker token cannot
/// shift or break another region, and the result does not depend on the
/// order of `fragments`. A missing, malformed or overlapping region fails
/// before any text is produced.
pub fn splice_all(template: &str, fragments: &[RenderedFragment], mode: SpliceMode) -> Result<String> {
    let mut located: Vec<(Region, &RenderedFragment)> = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        let region = locate(template, &fragment.marker, mode)?;
        if located.iter().any(|(r, _)| r.overlaps(&region)) {
            return Err(GlimpseError::MalformedMarker {
                marker: fragment.marker.clone(),
                reason: MalformedReason::Overlapping,
            });
        }
        located.push((region, fragment));
    }

    located.sort_by_key(|(region, _)| std::cmp::Reverse(region.start));

    let mut out = template.to_string();
    for (region, fragment) in &located {
        replace_region(&mut out, region, &fragment.text);
    }
    Ok(out)
}
