//! Citation and hallucination records.
//!
//! Records move through stages: the section parsers produce entries with
//! only the raw fields, and each resolution step consumes a read-only
//! record and returns a new, more complete one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::grounding::Span;

/// Hallucination risk flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    High,
    Unanswerable,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::High, RiskLevel::Unanswerable];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::High => "high",
            RiskLevel::Unanswerable => "unanswerable",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RiskLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| format!("unknown risk level: {s}"))
    }
}

/// A citation as parsed from the citations block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationEntry {
    pub citation_id: String,
    pub doc_id: String,
    pub context_text: String,
}

impl CitationEntry {
    /// Attach the span of `context_text` inside its document
    pub fn with_context(&self, context: Span) -> GroundedCitation {
        GroundedCitation {
            entry: self.clone(),
            context,
        }
    }
}

/// A citation whose context has been located in its document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundedCitation {
    pub entry: CitationEntry,
    pub context: Span,
}

impl GroundedCitation {
    /// Attach the response sentence the citation belongs to
    pub fn with_response(&self, response_text: String, response: Span) -> CitationRecord {
        CitationRecord {
            citation_id: self.entry.citation_id.clone(),
            doc_id: self.entry.doc_id.clone(),
            context_text: self.entry.context_text.clone(),
            context_begin: self.context.begin,
            context_end: self.context.end,
            response_text,
            response_begin: response.begin,
            response_end: response.end,
        }
    }
}

/// A fully resolved citation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationRecord {
    pub citation_id: String,
    pub doc_id: String,
    pub context_text: String,
    pub context_begin: usize,
    pub context_end: usize,
    pub response_text: String,
    pub response_begin: usize,
    pub response_end: usize,
}

impl CitationRecord {
    pub fn context_span(&self) -> Span {
        Span::new(self.context_begin, self.context_end)
    }

    pub fn response_span(&self) -> Span {
        Span::new(self.response_begin, self.response_end)
    }
}

/// A hallucination flag as parsed from the hallucinations block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallucinationEntry {
    pub hallucination_id: String,
    pub risk: RiskLevel,
    pub response_text: String,
}

impl HallucinationEntry {
    /// Replace the flagged text with its cleaned form and attach its span
    pub fn with_response(&self, response_text: String, response: Span) -> HallucinationRecord {
        HallucinationRecord {
            hallucination_id: self.hallucination_id.clone(),
            risk: self.risk,
            response_text,
            response_begin: response.begin,
            response_end: response.end,
        }
    }
}

/// A fully resolved hallucination flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallucinationRecord {
    pub hallucination_id: String,
    pub risk: RiskLevel,
    pub response_text: String,
    pub response_begin: usize,
    pub response_end: usize,
}

impl HallucinationRecord {
    pub fn response_span(&self) -> Span {
        Span::new(self.response_begin, self.response_end)
    }
}
