//! Parsing model output into resolved citation and hallucination records.
//!
//! This module contains:
//! - Citations / Hallucinations: Section entry parsers
//! - Sentences: Segmentation capability and citation attribution
//! - Pipeline: The end-to-end orchestrator
//! - Error: Every fatal parse condition

pub mod citations;
pub mod error;
mod grammar;
pub mod hallucinations;
pub mod pipeline;
pub mod sentences;

// Re-export commonly used types
pub use citations::parse_citations;
pub use error::{EntryKind, ParseError};
pub use hallucinations::parse_hallucinations;
pub use pipeline::{parse_output, process_output, OutputParser, ParseOptions};
pub use sentences::{attribute_sentences, PunctuationSegmenter, SentenceSegmenter};
