//! Parsing the `# Citations:` block.
//!
//! Entries look like `<co>1</co> Document 3: "quoted context"`. Each entry
//! starts at a citation marker and runs to the next one.

use std::collections::HashSet;

use super::grammar::{segment_entries, Cursor};
use super::{EntryKind, ParseError};
use crate::domain::CitationEntry;
use crate::markup::{find_markers, marker_at};

/// Parse the citations block into entries, in marker order
pub fn parse_citations(block: &str) -> Result<Vec<CitationEntry>, ParseError> {
    let starts: Vec<usize> = find_markers(block).iter().map(|m| m.begin).collect();
    if starts.is_empty() {
        return Err(ParseError::NoEntries {
            kind: EntryKind::Citation,
        });
    }

    let mut entries = Vec::with_capacity(starts.len());
    for segment in segment_entries(block, &starts) {
        let mut found = match_entries(segment);
        match found.len() {
            0 => {
                return Err(ParseError::NoMatchFound {
                    kind: EntryKind::Citation,
                    entry: segment.to_string(),
                })
            }
            1 => entries.append(&mut found),
            count => {
                return Err(ParseError::MultipleMatchesFound {
                    kind: EntryKind::Citation,
                    count,
                    entry: segment.to_string(),
                })
            }
        }
    }

    let mut seen = HashSet::new();
    for entry in &entries {
        if !seen.insert(entry.citation_id.as_str()) {
            tracing::warn!(
                stage = "citations",
                id = entry.citation_id.as_str(),
                "citation id listed more than once"
            );
        }
    }

    tracing::debug!(stage = "citations", count = entries.len(), "parsed citations block");
    Ok(entries)
}

/// Every match of the entry grammar inside one segment
///
/// The context runs to the end of the segment, so a match consumes the
/// rest of the text and scanning stops after it.
fn match_entries(segment: &str) -> Vec<CitationEntry> {
    let mut entries = Vec::new();

    for marker in find_markers(segment) {
        if let Some(entry) = match_entry_at(segment, marker.begin) {
            entries.push(entry);
            break;
        }
    }

    entries
}

/// `<co>ID</co>`, whitespace, `Document DOC: "`, then the context to the end
fn match_entry_at(segment: &str, pos: usize) -> Option<CitationEntry> {
    let marker = marker_at(segment, pos)?;

    let mut cursor = Cursor::new(&segment[marker.end..]);
    cursor.skip_whitespace();
    if !cursor.eat("Document ") {
        return None;
    }
    let doc_id = cursor.eat_digits()?;
    if !cursor.eat(": \"") {
        return None;
    }

    let raw_context = cursor.rest();
    if raw_context.is_empty() {
        return None;
    }

    let context_text = match raw_context.strip_suffix('"') {
        Some(inner) => inner,
        None => {
            tracing::warn!(
                stage = "citations",
                id = marker.id,
                context = raw_context,
                "last character of citation is not a double quote"
            );
            raw_context
        }
    };

    if mentions_other_document(context_text) {
        tracing::warn!(
            stage = "citations",
            id = marker.id,
            context = context_text,
            "citation text contains another document mention"
        );
    }

    Some(CitationEntry {
        citation_id: marker.id.to_string(),
        doc_id: doc_id.to_string(),
        context_text: context_text.to_string(),
    })
}

/// A line break followed by `Document N` inside a context usually means two
/// entries ran together.
fn mentions_other_document(context: &str) -> bool {
    context.match_indices("\nDocument ").any(|(idx, m)| {
        context[idx + m.len()..]
            .bytes()
            .next()
            .is_some_and(|b| b.is_ascii_digit())
    })
}
