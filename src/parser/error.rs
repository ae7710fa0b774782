//! Fatal parse failures.

use std::fmt;

use thiserror::Error;

use crate::grounding::SpanTarget;
use crate::limits::LimitViolation;

/// Which kind of section entry a parse error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Citation,
    Hallucination,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Citation => f.write_str("citation"),
            EntryKind::Hallucination => f.write_str("hallucination"),
        }
    }
}

/// Every condition that aborts a parse
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {kind} entries but found none")]
    NoEntries { kind: EntryKind },

    #[error("no {kind} components found in entry: {entry:?}")]
    NoMatchFound { kind: EntryKind, entry: String },

    #[error("expected one {kind} in entry but found {count}: {entry:?}")]
    MultipleMatchesFound {
        kind: EntryKind,
        count: usize,
        entry: String,
    },

    #[error("duplicate document id: {0}")]
    DuplicateKey(String),

    #[error("citation {citation_id} references unknown document {doc_id}")]
    UnknownDocument { citation_id: String, doc_id: String },

    #[error("citation {0} does not appear in the response text")]
    OrphanId(String),

    #[error("citation {citation_id} appears in more than one response sentence")]
    AmbiguousSentence { citation_id: String },

    #[error("citation {citation_id} sits in an empty first sentence")]
    EmptySentence { citation_id: String },

    #[error("sentence range [{begin}, {end}) is not a valid slice of a {len}-byte response")]
    InvalidSentenceRange { begin: usize, end: usize, len: usize },

    #[error("{target} text for {id} not found{}: {text:?}", whitespace_hint(.whitespace_only))]
    SpanNotFound {
        target: SpanTarget,
        id: String,
        text: String,
        whitespace_only: bool,
    },

    #[error("{target} span [{begin}, {end}) for {id} does not match stored text {expected:?}")]
    SpanMismatch {
        target: SpanTarget,
        id: String,
        begin: usize,
        end: usize,
        expected: String,
    },

    #[error(transparent)]
    Limit(#[from] LimitViolation),
}

fn whitespace_hint(whitespace_only: &bool) -> &'static str {
    if *whitespace_only {
        " (matches only after whitespace normalization)"
    } else {
        ""
    }
}
