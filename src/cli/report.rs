//! Human-readable rendering of a parsed assistant message.

use std::fmt::{self, Write};

use crate::domain::AssistantMessage;
use crate::grounding::{offset_to_line_col, Span};

/// Format a span as `[begin, end) at line:col`
fn describe_span(text: &str, span: Span) -> String {
    let pos = offset_to_line_col(text, span.begin);
    format!("[{}, {}) at {}:{}", span.begin, span.end, pos.line, pos.col)
}

fn document_text<'a>(message: &'a AssistantMessage, doc_id: &str) -> Option<&'a str> {
    message
        .documents
        .iter()
        .find(|d| d.doc_id == doc_id)
        .map(|d| d.text.as_str())
}

/// Render a message as a plain-text report
pub fn render(message: &AssistantMessage, fingerprint: &str) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "Response:")?;
    writeln!(out, "  {}", message.content)?;

    if let Some(reasoning) = &message.reasoning_content {
        writeln!(out)?;
        writeln!(out, "Reasoning:")?;
        writeln!(out, "  {}", reasoning)?;
    }

    writeln!(out)?;
    writeln!(out, "Citations ({}):", message.citations.len())?;
    for c in &message.citations {
        let context = Span::new(c.context_begin, c.context_end);
        let response = Span::new(c.response_begin, c.response_end);
        let context_at = match document_text(message, &c.doc_id) {
            Some(text) => describe_span(text, context),
            None => format!("[{}, {})", context.begin, context.end),
        };

        writeln!(out, "  [{}] Document {}", c.citation_id, c.doc_id)?;
        writeln!(out, "      context:  \"{}\" {}", c.context_text, context_at)?;
        writeln!(
            out,
            "      response: \"{}\" {}",
            c.response_text,
            describe_span(&message.content, response)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Hallucinations ({}):", message.hallucinations.len())?;
    for h in &message.hallucinations {
        let span = Span::new(h.response_begin, h.response_end);
        writeln!(
            out,
            "  [{}] risk {}: \"{}\" {}",
            h.hallucination_id,
            h.risk,
            h.response_text,
            describe_span(&message.content, span)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Fingerprint: {}", fingerprint)?;
    Ok(out)
}
