//! Span computation utilities for citation grounding
//!
//! This module locates fragments of text inside a larger target string
//! (a source document or the cleaned response) and turns the matches into
//! half-open offset ranges.
//!
//! # Design Decisions
//!
//! - **Exact match only**: spans are generated only for verbatim matches
//! - **First match wins**: repeated fragments resolve to the earliest occurrence
//! - **No normalization mapping**: whitespace-normalized search is a hint for
//!   the error message, never a source of offsets
//! - **UTF-8 byte offsets**: all offsets are byte indices into the target string

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::parser::ParseError;

/// A half-open `[begin, end)` byte range into a specific target string
///
/// Offsets count UTF-8 bytes, not Unicode scalar values, so `&text[begin..end]`
/// is always a valid slice. Outside ASCII they differ from codepoint offsets:
/// in `"The café opened in 1998."` the sentence ends at byte 25 but at
/// codepoint 24. Use `offset_to_line_col` for character positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl Span {
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// The slice of `text` this span covers, or `None` if out of bounds or
    /// not on a character boundary.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.begin..self.end)
    }
}

/// The string a span is resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanTarget {
    /// Cited text inside the referenced document
    DocumentContext,
    /// Sentence of the cleaned response a citation belongs to
    CitationResponse,
    /// Flagged text inside the cleaned response
    HallucinationResponse,
}

impl SpanTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanTarget::DocumentContext => "document context",
            SpanTarget::CitationResponse => "citation response",
            SpanTarget::HallucinationResponse => "hallucination response",
        }
    }
}

impl fmt::Display for SpanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of searching for a fragment in a target string
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// All non-overlapping byte ranges where the fragment was found
    pub matches: Vec<Span>,
    /// Whether a whitespace-normalized match was found (hint for not-found errors)
    pub normalized_hint: bool,
}

impl MatchResult {
    /// Returns the status based on match count
    pub fn status(&self) -> MatchStatus {
        match self.matches.len() {
            0 => MatchStatus::Unresolved,
            1 => MatchStatus::Resolved,
            _ => MatchStatus::Ambiguous,
        }
    }

    /// Returns the selected match (first one, deterministic)
    pub fn selected_match(&self) -> Option<Span> {
        self.matches.first().copied()
    }
}

/// Status of fragment resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// Exactly one match found
    Resolved,
    /// Multiple matches found, first selected
    Ambiguous,
    /// No match found
    Unresolved,
}

/// Find all exact, non-overlapping occurrences of `fragment` in `text`
///
/// Matches are reported left to right. An empty fragment matches at every
/// character boundary, so it always resolves to `[0, 0)`.
pub fn find_exact_matches(text: &str, fragment: &str) -> Vec<Span> {
    text.match_indices(fragment)
        .map(|(begin, m)| Span::new(begin, begin + m.len()))
        .collect()
}

/// Check if a whitespace-normalized version of the fragment exists in text
///
/// This is used as a hint for the not-found error only.
fn has_normalized_match(text: &str, fragment: &str) -> bool {
    let normalized_fragment = normalize_whitespace(fragment);
    if normalized_fragment.is_empty() {
        return false;
    }
    normalize_whitespace(text).contains(&normalized_fragment)
}

/// Normalize whitespace: collapse runs of whitespace to single space, trim
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Find a fragment in a target string with full match result
pub fn find_fragment(text: &str, fragment: &str) -> MatchResult {
    let matches = find_exact_matches(text, fragment);

    let normalized_hint = if matches.is_empty() {
        has_normalized_match(text, fragment)
    } else {
        false
    };

    MatchResult {
        matches,
        normalized_hint,
    }
}

/// Resolve `fragment` to a single span inside `text`
///
/// Zero matches is fatal. Several matches select the first occurrence and
/// log a warning tagged with the record id.
pub fn resolve_span(
    text: &str,
    fragment: &str,
    target: SpanTarget,
    record_id: &str,
) -> Result<Span, ParseError> {
    let result = find_fragment(text, fragment);

    let Some(span) = result.selected_match() else {
        return Err(ParseError::SpanNotFound {
            target,
            id: record_id.to_string(),
            text: fragment.to_string(),
            whitespace_only: result.normalized_hint,
        });
    };

    if result.status() == MatchStatus::Ambiguous {
        tracing::warn!(
            stage = "resolve",
            target = target.as_str(),
            id = record_id,
            match_count = result.matches.len(),
            "text found multiple times, selecting first match"
        );
    }

    Ok(span)
}

/// Compute SHA256 hash of a byte slice, returning hex string with prefix
pub fn compute_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    format!("sha256:{}", hex::encode(result))
}

/// Line and column position (1-indexed for editor compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    pub line: usize,
    pub col: usize,
}

/// Convert a byte offset to a line/column position
///
/// Column counts characters, not bytes. Offsets past the end clamp to the
/// end of the text.
pub fn offset_to_line_col(text: &str, offset: usize) -> LineCol {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let prefix = &text[..offset];

    let line = prefix.matches('\n').count() + 1;

    // Find the start of the current line
    let line_start = prefix.rfind('\n').map(|i| i + 1).unwrap_or(0);

    let col = text[line_start..offset].chars().count() + 1;

    LineCol { line, col }
}
