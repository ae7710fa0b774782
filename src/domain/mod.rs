//! Domain types for citemark.
//!
//! This module contains the core data structures:
//! - Document: Caller-owned source text, indexed by id
//! - Records: Citation and hallucination records at each resolution stage
//! - Result: The parsed result and the assembled assistant message

pub mod document;
pub mod record;
pub mod result;

// Re-export commonly used types
pub use document::{Document, DocumentIndex};
pub use record::{
    CitationEntry, CitationRecord, GroundedCitation, HallucinationEntry, HallucinationRecord,
    RiskLevel,
};
pub use result::{AssistantMessage, ParsedResult};
