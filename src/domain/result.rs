//! Terminal parse artifacts.

use serde::{Deserialize, Serialize};

use super::document::Document;
use super::record::{CitationRecord, HallucinationRecord};
use crate::grounding::compute_hash;

/// Structured result of parsing one model output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResult {
    /// The documents the output was parsed against
    pub docs: Vec<Document>,
    /// Response text with all citation markup removed
    pub response: String,
    pub citations: Vec<CitationRecord>,
    pub hallucinations: Vec<HallucinationRecord>,
}

impl ParsedResult {
    /// SHA256 over the canonical JSON form, in format "sha256:abc123..."
    ///
    /// Identical inputs always produce identical fingerprints.
    pub fn fingerprint(&self) -> serde_json::Result<String> {
        let json = serde_json::to_vec(self)?;
        Ok(compute_hash(&json))
    }
}

/// The assistant turn reconstructed from a model output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantMessage {
    /// Cleaned response text
    pub content: String,
    /// Chain-of-thought text, when reasoning was requested and found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
    pub citations: Vec<CitationRecord>,
    /// Documents referenced by at least one citation, in first-citation order
    pub documents: Vec<Document>,
    pub hallucinations: Vec<HallucinationRecord>,
    /// The unmodified model output
    pub raw: String,
}

impl AssistantMessage {
    /// Assemble a message from a parse result
    pub fn from_parsed(parsed: ParsedResult, reasoning_content: Option<String>, raw: &str) -> Self {
        let mut documents: Vec<Document> = Vec::new();
        for citation in &parsed.citations {
            if documents.iter().any(|d| d.doc_id == citation.doc_id) {
                continue;
            }
            if let Some(doc) = parsed.docs.iter().find(|d| d.doc_id == citation.doc_id) {
                documents.push(doc.clone());
            }
        }

        Self {
            content: parsed.response,
            reasoning_content,
            citations: parsed.citations,
            documents,
            hallucinations: parsed.hallucinations,
            raw: raw.to_string(),
        }
    }
}
