//! End-to-end parsing of one model output.
//!
//! The pipeline is strictly linear: split blocks, strip the response,
//! parse and resolve hallucinations, parse and resolve citations, run the
//! advisory structure checks, assemble, and optionally self-check spans.
//! Any fatal condition aborts the whole parse.

use serde::{Deserialize, Serialize};

use super::citations::parse_citations;
use super::hallucinations::parse_hallucinations;
use super::sentences::{attribute_sentences, PunctuationSegmenter, SentenceSegmenter};
use super::ParseError;
use crate::domain::{
    AssistantMessage, CitationRecord, Document, DocumentIndex, HallucinationRecord, ParsedResult,
};
use crate::grounding::{resolve_span, validate_spans, SpanTarget};
use crate::limits::InputLimits;
use crate::markup::{check_structure, split_blocks, strip_markers};
use crate::reasoning::split_reasoning;

/// Knobs for a parse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Recompute every span after assembly and fail on mismatch
    #[serde(default)]
    pub validate_spans: bool,
    /// Separate chain-of-thought text before parsing the response
    #[serde(default)]
    pub thinking: bool,
    /// Reject oversized inputs up front
    #[serde(default)]
    pub limits: Option<InputLimits>,
}

/// Parses model output using a configurable sentence segmenter
pub struct OutputParser {
    options: ParseOptions,
    segmenter: Box<dyn SentenceSegmenter + Send + Sync>,
}

impl Default for OutputParser {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

impl OutputParser {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            segmenter: Box::new(PunctuationSegmenter),
        }
    }

    /// Replace the default punctuation-based segmenter
    pub fn with_segmenter(mut self, segmenter: impl SentenceSegmenter + Send + Sync + 'static) -> Self {
        self.segmenter = Box::new(segmenter);
        self
    }

    /// Parse `raw` against `docs` into a fully resolved result
    pub fn parse(&self, raw: &str, docs: &[Document]) -> Result<ParsedResult, ParseError> {
        if let Some(limits) = &self.options.limits {
            limits.check(raw, docs)?;
        }
        let index = DocumentIndex::build(docs)?;

        let blocks = split_blocks(raw);
        tracing::debug!(
            response_bytes = blocks.response.len(),
            citations_bytes = blocks.citations.len(),
            hallucinations_bytes = blocks.hallucinations.len(),
            "split model output"
        );

        let response = strip_markers(blocks.response).trim().to_string();

        let hallucinations = if blocks.hallucinations.is_empty() {
            Vec::new()
        } else {
            resolve_hallucinations(blocks.hallucinations, &response)?
        };

        let citations = if blocks.citations.is_empty() {
            Vec::new()
        } else {
            resolve_citations(
                blocks.citations,
                blocks.response,
                &response,
                &index,
                self.segmenter.as_ref(),
            )?
        };

        check_structure(blocks.response, citations.len());

        let result = ParsedResult {
            docs: docs.to_vec(),
            response,
            citations,
            hallucinations,
        };

        if self.options.validate_spans {
            validate_spans(&result)?;
        }

        Ok(result)
    }

    /// Parse `raw` into an assistant message, separating reasoning first
    /// when enabled
    pub fn process(&self, raw: &str, docs: &[Document]) -> Result<AssistantMessage, ParseError> {
        if !self.options.thinking {
            let parsed = self.parse(raw, docs)?;
            return Ok(AssistantMessage::from_parsed(parsed, None, raw));
        }

        if let Some(limits) = &self.options.limits {
            limits.validate_output(raw)?;
        }
        let split = split_reasoning(raw);
        let parsed = self.parse(&split.response, docs)?;
        Ok(AssistantMessage::from_parsed(parsed, split.reasoning, raw))
    }
}

/// Parse and resolve the hallucinations block against the cleaned response
fn resolve_hallucinations(
    block: &str,
    response: &str,
) -> Result<Vec<HallucinationRecord>, ParseError> {
    parse_hallucinations(block)?
        .iter()
        .map(|entry| {
            let cleaned = strip_markers(&entry.response_text);
            let span = resolve_span(
                response,
                &cleaned,
                SpanTarget::HallucinationResponse,
                &entry.hallucination_id,
            )?;
            Ok(entry.with_response(cleaned, span))
        })
        .collect()
}

/// Parse the citations block, ground each context in its document, then
/// attach the response sentence each citation belongs to
fn resolve_citations(
    block: &str,
    marked_response: &str,
    response: &str,
    index: &DocumentIndex<'_>,
    segmenter: &dyn SentenceSegmenter,
) -> Result<Vec<CitationRecord>, ParseError> {
    let entries = parse_citations(block)?;

    let grounded = entries
        .iter()
        .map(|entry| {
            let doc = index
                .get(&entry.doc_id)
                .ok_or_else(|| ParseError::UnknownDocument {
                    citation_id: entry.citation_id.clone(),
                    doc_id: entry.doc_id.clone(),
                })?;
            let span = resolve_span(
                &doc.text,
                &entry.context_text,
                SpanTarget::DocumentContext,
                &entry.citation_id,
            )?;
            Ok(entry.with_context(span))
        })
        .collect::<Result<Vec<_>, ParseError>>()?;

    let sentences = attribute_sentences(marked_response, segmenter)?;

    grounded
        .iter()
        .map(|citation| {
            let id = &citation.entry.citation_id;
            let sentence = sentences
                .get(id)
                .ok_or_else(|| ParseError::OrphanId(id.clone()))?;
            let span = resolve_span(response, sentence, SpanTarget::CitationResponse, id)?;
            Ok(citation.with_response(sentence.clone(), span))
        })
        .collect()
}

/// Parse `raw` against `docs` with the default segmenter
pub fn parse_output(
    raw: &str,
    docs: &[Document],
    options: &ParseOptions,
) -> Result<ParsedResult, ParseError> {
    OutputParser::new(options.clone()).parse(raw, docs)
}

/// Parse `raw` into an assistant message with the default segmenter
pub fn process_output(
    raw: &str,
    docs: &[Document],
    options: &ParseOptions,
) -> Result<AssistantMessage, ParseError> {
    OutputParser::new(options.clone()).process(raw, docs)
}
