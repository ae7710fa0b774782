//! citemark - Span-accurate citation and hallucination extraction
//!
//! Parses the output of a retrieval-augmented language model that marks
//! citations inline with `<co>N</co>` tags and appends `# Citations:` and
//! `# Hallucinations:` sections. Every extracted fragment is resolved to an
//! exact byte span in either a source document or the cleaned response.
//!
//! # Pipeline
//!
//! - Split the output into response, citations and hallucinations blocks
//! - Strip inline markers from the response
//! - Parse and resolve hallucination entries against the response
//! - Parse citation entries, ground each context in its document, and
//!   attribute the response sentence each marker sits in
//! - Optionally recompute every span as a self-check
//!
//! # Modules
//!
//! - `markup`: Marker scanning, stripping, block splitting, structure checks
//! - `parser`: Section parsers, sentence attribution, the pipeline
//! - `grounding`: Span resolution and consistency validation
//! - `domain`: Documents, records and results
//! - `reasoning`: Chain-of-thought separation
//! - `limits`: Input size limits
//! - `config`: YAML configuration
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```
//! use citemark::{parse_output, Document, ParseOptions};
//!
//! let raw = "Mad about dog!<co>1</co>\n\n# Citations:\n\n<co>1</co> Document 1: \"Dog info\"";
//! let docs = vec![Document::new("1", "Dog info")];
//! let result = parse_output(raw, &docs, &ParseOptions::default()).unwrap();
//!
//! assert_eq!(result.response, "Mad about dog!");
//! assert_eq!(result.citations[0].context_end, 8);
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod grounding;
pub mod limits;
pub mod markup;
pub mod parser;
pub mod reasoning;

// Re-export main types at crate root for convenience
pub use domain::{
    AssistantMessage, CitationRecord, Document, HallucinationRecord, ParsedResult, RiskLevel,
};
pub use grounding::{validate_spans, Span};
pub use limits::{InputLimits, LimitViolation};
pub use markup::strip_markers;
pub use parser::{parse_output, process_output, OutputParser, ParseError, ParseOptions};
pub use reasoning::split_reasoning;
