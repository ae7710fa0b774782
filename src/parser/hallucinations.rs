//! Parsing the `# Hallucinations:` block.
//!
//! Entries look like `1. Risk low: flagged response text`.

use super::grammar::{segment_entries, Cursor};
use super::{EntryKind, ParseError};
use crate::domain::{HallucinationEntry, RiskLevel};

const RISK_LEVELS: [&str; 3] = ["low", "high", "unanswerable"];

/// Parse the hallucinations block into entries, in block order
pub fn parse_hallucinations(block: &str) -> Result<Vec<HallucinationEntry>, ParseError> {
    let starts = entry_starts(block);
    if starts.is_empty() {
        return Err(ParseError::NoEntries {
            kind: EntryKind::Hallucination,
        });
    }

    let mut entries = Vec::with_capacity(starts.len());
    for segment in segment_entries(block, &starts) {
        let mut found = match_entries(segment);
        match found.len() {
            0 => {
                return Err(ParseError::NoMatchFound {
                    kind: EntryKind::Hallucination,
                    entry: segment.to_string(),
                })
            }
            1 => entries.append(&mut found),
            count => {
                return Err(ParseError::MultipleMatchesFound {
                    kind: EntryKind::Hallucination,
                    count,
                    entry: segment.to_string(),
                })
            }
        }
    }

    tracing::debug!(
        stage = "hallucinations",
        count = entries.len(),
        "parsed hallucinations block"
    );
    Ok(entries)
}

/// Offsets of every `N. Risk LEVEL:` header, left to right, non-overlapping
fn entry_starts(block: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut pos = 0;

    while pos < block.len() {
        let Some(run) = block[pos..].find(|c: char| c.is_ascii_digit()) else {
            break;
        };
        let begin = pos + run;
        let mut cursor = Cursor::new(&block[begin..]);
        match read_header(&mut cursor) {
            Some(_) => {
                starts.push(begin);
                pos = begin + cursor.pos();
            }
            None => {
                // A shorter suffix of the same digit run cannot match either
                let digits = block[begin..].bytes().take_while(|b| b.is_ascii_digit()).count();
                pos = begin + digits;
            }
        }
    }

    starts
}

/// `N.`, optional whitespace, `Risk LEVEL:`; returns the id and level
fn read_header<'a>(cursor: &mut Cursor<'a>) -> Option<(&'a str, RiskLevel)> {
    let id = cursor.eat_digits()?;
    if !cursor.eat(".") {
        return None;
    }
    cursor.skip_whitespace();
    if !cursor.eat("Risk ") {
        return None;
    }
    let level = cursor.eat_any(&RISK_LEVELS)?;
    if !cursor.eat(":") {
        return None;
    }
    Some((id, level.parse().ok()?))
}

/// Every match of the entry grammar inside one segment
///
/// The flagged text runs to the end of the segment, so a match consumes
/// the rest of the text and scanning stops after it.
fn match_entries(segment: &str) -> Vec<HallucinationEntry> {
    let mut entries = Vec::new();

    for begin in entry_starts(segment) {
        let mut cursor = Cursor::new(&segment[begin..]);
        let Some((id, risk)) = read_header(&mut cursor) else {
            continue;
        };
        if !cursor.eat(" ") || cursor.rest().is_empty() {
            continue;
        }
        entries.push(HallucinationEntry {
            hallucination_id: id.to_string(),
            risk,
            response_text: cursor.rest().to_string(),
        });
        break;
    }

    entries
}
