//! Parse Pipeline Integration Tests
//!
//! End-to-end parsing of model output through the public API.

use citemark::parser::EntryKind;
use citemark::{
    parse_output, process_output, validate_spans, Document, HallucinationRecord, InputLimits,
    LimitViolation, ParseError, ParseOptions, RiskLevel,
};

const CITED: &str =
    "Mad about dog!<co>1</co>\n\n# Citations:\n\n<co>1</co> Document 1: \"Dog info\"";

fn dog_docs() -> Vec<Document> {
    vec![Document::new("1", "Dog info")]
}

fn strict() -> ParseOptions {
    ParseOptions {
        validate_spans: true,
        ..Default::default()
    }
}

#[test]
fn test_response_without_sections() {
    let result = parse_output("Mad about dog!", &[], &strict()).unwrap();

    assert_eq!(result.response, "Mad about dog!");
    assert!(result.citations.is_empty());
    assert!(result.hallucinations.is_empty());
}

#[test]
fn test_single_citation_offsets() {
    let result = parse_output(CITED, &dog_docs(), &strict()).unwrap();

    assert_eq!(result.response, "Mad about dog!");
    assert_eq!(result.citations.len(), 1);

    let citation = &result.citations[0];
    assert_eq!(citation.citation_id, "1");
    assert_eq!(citation.doc_id, "1");
    assert_eq!(citation.context_text, "Dog info");
    assert_eq!((citation.context_begin, citation.context_end), (0, 8));
    assert_eq!(citation.response_text, "Mad about dog!");
    assert_eq!((citation.response_begin, citation.response_end), (0, 14));
}

#[test]
fn test_citation_with_hallucination() {
    let raw = format!("{CITED}\n\n# Hallucinations:\n\n1. Risk low: Mad about dog");
    let result = parse_output(&raw, &dog_docs(), &strict()).unwrap();

    assert_eq!(result.citations.len(), 1);
    assert_eq!(
        result.hallucinations,
        vec![HallucinationRecord {
            hallucination_id: "1".to_string(),
            risk: RiskLevel::Low,
            response_text: "Mad about dog".to_string(),
            response_begin: 0,
            response_end: 13,
        }]
    );
}

#[test]
fn test_multi_sentence_multi_document() {
    let raw = "Dogs are loyal.<co>1</co> Cats are independent.<co>2</co>\n\n\
               # Citations:\n\n\
               <co>1</co> Document 10: \"loyal companions\"\n\
               <co>2</co> Document 20: \"independent hunters\"";
    let docs = vec![
        Document::new("10", "Dogs are loyal companions."),
        Document::new("20", "Cats are independent hunters."),
    ];

    let result = parse_output(raw, &docs, &strict()).unwrap();
    assert_eq!(result.response, "Dogs are loyal.Cats are independent.");

    let first = &result.citations[0];
    assert_eq!(first.response_text, "Dogs are loyal.");
    assert_eq!((first.context_begin, first.context_end), (9, 25));

    let second = &result.citations[1];
    assert_eq!(second.doc_id, "20");
    assert_eq!(second.response_text, "Cats are independent.");
    assert_eq!(second.response_begin, 15);
    assert_eq!(
        &result.response[second.response_begin..second.response_end],
        "Cats are independent."
    );
}

#[test]
fn test_every_span_slices_its_text() {
    let raw = format!("{CITED}\n\n# Hallucinations:\n\n1. Risk high: about\n2. Risk unanswerable: dog!");
    let result = parse_output(&raw, &dog_docs(), &ParseOptions::default()).unwrap();

    for h in &result.hallucinations {
        assert_eq!(&result.response[h.response_begin..h.response_end], h.response_text);
    }
    assert_eq!(result.hallucinations[1].risk, RiskLevel::Unanswerable);
    assert!(validate_spans(&result).is_ok());
}

#[test]
fn test_repeated_context_resolves_to_first_occurrence() {
    let docs = vec![Document::new("1", "Dog info. Dog info")];
    let result = parse_output(CITED, &docs, &strict()).unwrap();

    let citation = &result.citations[0];
    assert_eq!(citation.context_begin, 0);
    assert_eq!(citation.context_end, 8);
}

#[test]
fn test_offsets_count_bytes() {
    let raw = "The café opened in 1998.<co>1</co>\n\n# Citations:\n\n<co>1</co> Document 1: \"café\"";
    let docs = vec![Document::new("1", "Le café")];
    let result = parse_output(raw, &docs, &strict()).unwrap();

    let citation = &result.citations[0];
    assert_eq!((citation.response_begin, citation.response_end), (0, 25));
    assert_eq!((citation.context_begin, citation.context_end), (3, 8));
}

#[test]
fn test_citations_block_without_markers() {
    let raw = "Mad about dog!\n\n# Citations:\n\nDocument 1: \"Dog info\"";
    let err = parse_output(raw, &dog_docs(), &strict()).unwrap_err();

    assert_eq!(
        err,
        ParseError::NoEntries {
            kind: EntryKind::Citation
        }
    );
}

#[test]
fn test_duplicate_document_ids() {
    let docs = vec![Document::new("1", "Dog info"), Document::new("1", "Cat info")];
    let err = parse_output(CITED, &docs, &strict()).unwrap_err();

    assert_eq!(err, ParseError::DuplicateKey("1".to_string()));
}

#[test]
fn test_context_not_in_document() {
    let docs = vec![Document::new("1", "Cat info")];
    let err = parse_output(CITED, &docs, &strict()).unwrap_err();

    match err {
        ParseError::SpanNotFound { id, text, .. } => {
            assert_eq!(id, "1");
            assert_eq!(text, "Dog info");
        }
        other => panic!("Expected SpanNotFound, got {other:?}"),
    }
}

#[test]
fn test_hallucination_not_in_response() {
    let raw = "Mad about dog!\n\n# Hallucinations:\n\n1. Risk high: Mad about cat";
    let err = parse_output(raw, &[], &strict()).unwrap_err();

    assert!(matches!(err, ParseError::SpanNotFound { .. }));
}

#[test]
fn test_malformed_hallucinations_block() {
    let raw = "Mad about dog!\n\n# Hallucinations:\n\nnothing to see";
    let err = parse_output(raw, &[], &strict()).unwrap_err();

    assert_eq!(
        err,
        ParseError::NoEntries {
            kind: EntryKind::Hallucination
        }
    );
}

#[test]
fn test_limits_reject_large_output() {
    let options = ParseOptions {
        limits: Some(InputLimits {
            max_output_bytes: 10,
            ..Default::default()
        }),
        ..Default::default()
    };

    let err = parse_output(CITED, &dog_docs(), &options).unwrap_err();
    assert!(matches!(
        err,
        ParseError::Limit(LimitViolation::MaxOutputBytes { limit: 10, .. })
    ));
}

#[test]
fn test_fingerprint_is_stable() {
    let a = parse_output(CITED, &dog_docs(), &strict()).unwrap();
    let b = parse_output(CITED, &dog_docs(), &strict()).unwrap();

    assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    assert!(a.fingerprint().unwrap().starts_with("sha256:"));

    let other = parse_output("Mad about dog!", &[], &strict()).unwrap();
    assert_ne!(a.fingerprint().unwrap(), other.fingerprint().unwrap());
}

#[test]
fn test_process_output_with_reasoning() {
    let raw = format!("Here's my thought process:\nThe user likes dogs.\nHere's my response:\n{CITED}");
    let options = ParseOptions {
        thinking: true,
        validate_spans: true,
        ..Default::default()
    };
    let docs = vec![Document::new("1", "Dog info"), Document::new("2", "Unused")];

    let message = process_output(&raw, &docs, &options).unwrap();
    assert_eq!(message.reasoning_content.as_deref(), Some("The user likes dogs."));
    assert_eq!(message.content, "Mad about dog!");
    assert_eq!(message.documents, vec![Document::new("1", "Dog info")]);
    assert_eq!(message.raw, raw);
}

#[test]
fn test_message_serialization() {
    let message = process_output(CITED, &dog_docs(), &strict()).unwrap();
    let json = serde_json::to_value(&message).unwrap();

    assert_eq!(json["content"], "Mad about dog!");
    assert!(json.get("reasoning_content").is_none());
    assert_eq!(json["citations"][0]["context_end"], 8);
    assert_eq!(json["documents"][0]["doc_id"], "1");
}
