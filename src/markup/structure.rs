//! Advisory checks on citation markup in the raw response.
//!
//! Generated text is often sloppy about tags, so nothing here aborts a
//! parse: findings are returned to the caller and logged as warnings.

use std::fmt;

use serde::Serialize;

use super::tags::{CLOSE_TAG, OPEN_TAG};

/// A structural problem found in the response markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralWarning {
    /// An open tag appears inside another open tag on the same line
    NestedTags { offset: usize },
    /// Open and close tag counts differ
    UnbalancedTags { open: usize, close: usize },
    /// Open tag count differs from the number of parsed citations
    CitationCountMismatch { markers: usize, records: usize },
}

impl fmt::Display for StructuralWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralWarning::NestedTags { offset } => {
                write!(f, "response contains nested {OPEN_TAG} tags at byte {offset}")
            }
            StructuralWarning::UnbalancedTags { open, close } => write!(
                f,
                "response contains {open} {OPEN_TAG} tags but {close} {CLOSE_TAG} tags"
            ),
            StructuralWarning::CitationCountMismatch { markers, records } => write!(
                f,
                "response contains {markers} citation markers but {records} citations were parsed"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Open,
    Close,
}

/// All open/close tags in order, with their byte ranges
fn scan_tags(text: &str) -> Vec<(Tag, usize, usize)> {
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(found) = text[pos..].find('<') {
        let at = pos + found;
        let rest = &text[at..];
        if rest.starts_with(OPEN_TAG) {
            tags.push((Tag::Open, at, at + OPEN_TAG.len()));
            pos = at + OPEN_TAG.len();
        } else if rest.starts_with(CLOSE_TAG) {
            tags.push((Tag::Close, at, at + CLOSE_TAG.len()));
            pos = at + CLOSE_TAG.len();
        } else {
            pos = at + 1;
        }
    }

    tags
}

/// Find an open tag followed by a second open tag and then a close tag,
/// with no other tag and no line break in between. Returns the byte offset
/// of the outer open tag.
fn find_nested_open(text: &str, tags: &[(Tag, usize, usize)]) -> Option<usize> {
    tags.windows(3).find_map(|w| {
        let (t0, b0, e0) = w[0];
        let (t1, b1, e1) = w[1];
        let (t2, b2, _) = w[2];
        let same_line = !text[e0..b1].contains('\n') && !text[e1..b2].contains('\n');
        (t0 == Tag::Open && t1 == Tag::Open && t2 == Tag::Close && same_line).then_some(b0)
    })
}

/// Check tag nesting, tag balance, and marker count against parsed records
pub fn check_structure(response: &str, record_count: usize) -> Vec<StructuralWarning> {
    let tags = scan_tags(response);
    let mut warnings = Vec::new();

    if let Some(offset) = find_nested_open(response, &tags) {
        warnings.push(StructuralWarning::NestedTags { offset });
    }

    let open = tags.iter().filter(|(t, _, _)| *t == Tag::Open).count();
    let close = tags.len() - open;

    if open != close {
        warnings.push(StructuralWarning::UnbalancedTags { open, close });
    }

    if open != record_count {
        warnings.push(StructuralWarning::CitationCountMismatch {
            markers: open,
            records: record_count,
        });
    }

    for warning in &warnings {
        tracing::warn!(stage = "structure", "{}", warning);
    }

    warnings
}
