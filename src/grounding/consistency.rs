//! Post-hoc span consistency check.
//!
//! Recomputes every stored substring from its recorded offsets and compares
//! it with the stored text. Intended as a self-check on resolver output in
//! tests and debug runs.

use super::spans::{Span, SpanTarget};
use crate::domain::{DocumentIndex, ParsedResult};
use crate::parser::ParseError;

fn check(
    target_text: &str,
    span: Span,
    expected: &str,
    target: SpanTarget,
    id: &str,
) -> Result<(), ParseError> {
    if span.slice(target_text) == Some(expected) {
        return Ok(());
    }
    Err(ParseError::SpanMismatch {
        target,
        id: id.to_string(),
        begin: span.begin,
        end: span.end,
        expected: expected.to_string(),
    })
}

/// Verify that every citation and hallucination span reproduces its text
pub fn validate_spans(result: &ParsedResult) -> Result<(), ParseError> {
    for hallucination in &result.hallucinations {
        check(
            &result.response,
            hallucination.response_span(),
            &hallucination.response_text,
            SpanTarget::HallucinationResponse,
            &hallucination.hallucination_id,
        )?;
    }

    let docs = DocumentIndex::build(&result.docs)?;

    for citation in &result.citations {
        check(
            &result.response,
            citation.response_span(),
            &citation.response_text,
            SpanTarget::CitationResponse,
            &citation.citation_id,
        )?;

        let doc = docs
            .get(&citation.doc_id)
            .ok_or_else(|| ParseError::UnknownDocument {
                citation_id: citation.citation_id.clone(),
                doc_id: citation.doc_id.clone(),
            })?;
        check(
            &doc.text,
            citation.context_span(),
            &citation.context_text,
            SpanTarget::DocumentContext,
            &citation.citation_id,
        )?;
    }

    tracing::debug!(
        citations = result.citations.len(),
        hallucinations = result.hallucinations.len(),
        "span consistency check passed"
    );
    Ok(())
}
