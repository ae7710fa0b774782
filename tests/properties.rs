//! Property tests for marker stripping and span resolution.

use citemark::markup::find_markers;
use citemark::{parse_output, strip_markers, validate_spans, Document, ParseOptions};
use proptest::prelude::*;

/// Text built from marker fragments, digits, and filler
fn markup_soup() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("<co>".to_string()),
            Just("</co>".to_string()),
            "[0-9]{1,2}",
            "[a-z .\n]{0,4}",
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

/// A sentence whose last word cannot be mistaken for an abbreviation
fn sentence() -> impl Strategy<Value = String> {
    (prop::collection::vec("[a-z]{2,8}", 0..4), "[a-z]{7,10}").prop_map(|(mut words, last)| {
        words.push(last);
        format!("{}.", words.join(" "))
    })
}

proptest! {
    #[test]
    fn strip_is_idempotent(text in markup_soup()) {
        let once = strip_markers(&text);
        prop_assert_eq!(strip_markers(&once), once.clone());
        prop_assert!(find_markers(&once).is_empty());
    }

    #[test]
    fn strip_leaves_plain_text_alone(text in "[a-z .,\n]{0,40}") {
        prop_assert_eq!(strip_markers(&text), text);
    }

    #[test]
    fn resolved_spans_slice_their_text(
        cited in prop::collection::vec((sentence(), "[a-z]{3,10}"), 1..5)
    ) {
        let mut response = Vec::new();
        let mut entries = Vec::new();
        let mut docs = Vec::new();

        for (i, (text, context)) in cited.iter().enumerate() {
            let id = i + 1;
            response.push(format!("{text}<co>{id}</co>"));
            entries.push(format!("<co>{id}</co> Document {id}: \"{context}\""));
            docs.push(Document::new(id.to_string(), format!("before {context} after")));
        }
        let raw = format!("{}\n\n# Citations:\n\n{}", response.join(" "), entries.join("\n"));

        let options = ParseOptions { validate_spans: true, ..Default::default() };
        let result = parse_output(&raw, &docs, &options).unwrap();

        prop_assert_eq!(result.citations.len(), cited.len());
        prop_assert!(find_markers(&result.response).is_empty());
        for (citation, (text, context)) in result.citations.iter().zip(&cited) {
            prop_assert_eq!(&citation.response_text, text);
            prop_assert_eq!(&citation.context_text, context);
            prop_assert_eq!(
                &result.response[citation.response_begin..citation.response_end],
                text.as_str()
            );
        }
        prop_assert!(validate_spans(&result).is_ok());
    }
}
