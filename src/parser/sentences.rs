//! Sentence segmentation and citation-to-sentence attribution.

use std::collections::HashMap;
use std::ops::Range;

use super::ParseError;
use crate::markup::{find_markers, marker_at, strip_markers};

/// Segments text into ordered, non-overlapping sentence ranges
///
/// Ranges are byte offsets into the segmented text and must fall on
/// character boundaries.
pub trait SentenceSegmenter {
    fn segment(&self, text: &str) -> Vec<Range<usize>>;
}

impl<F> SentenceSegmenter for F
where
    F: Fn(&str) -> Vec<Range<usize>>,
{
    fn segment(&self, text: &str) -> Vec<Range<usize>> {
        self(text)
    }
}

/// Abbreviations that end in a period without ending a sentence
const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "etc", "vs", "Mr", "Mrs", "Ms", "Dr", "Prof", "St", "Jr", "Sr", "No", "Fig",
    "approx", "cf", "al",
];

const TERMINATORS: &[char] = &['.', '!', '?'];
const CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201d}', '\u{2019}'];

/// Rule-based segmenter breaking after terminal punctuation
///
/// A sentence ends after a run of `.`, `!` or `?`, any closing quotes or
/// brackets, and any citation markers attached after it, when followed by
/// whitespace or the end of text. Periods after known abbreviations and
/// single-letter initials do not end a sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationSegmenter;

impl PunctuationSegmenter {
    /// Position just past the sentence tail starting at `pos` (closers and
    /// trailing markers), or `None` if no break is allowed here.
    fn sentence_end(text: &str, pos: usize) -> Option<usize> {
        let mut end = pos + text[pos..].len() - text[pos..].trim_start_matches(CLOSERS).len();

        loop {
            let rest = &text[end..];
            let next = end + rest.len() - rest.trim_start().len();
            match marker_at(text, next) {
                Some(marker) => end = marker.end,
                None => break,
            }
        }

        match text[end..].chars().next() {
            None => Some(end),
            Some(c) if c.is_whitespace() => Some(end),
            Some(_) => None,
        }
    }

    fn is_abbreviation(text: &str, period: usize) -> bool {
        let word_start = text[..period]
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        let word = text[word_start..period].trim_start_matches(['(', '"', '\'']);

        if word.chars().count() == 1 && word.chars().all(|c| c.is_alphabetic()) {
            return true;
        }
        ABBREVIATIONS.contains(&word)
    }
}

impl SentenceSegmenter for PunctuationSegmenter {
    fn segment(&self, text: &str) -> Vec<Range<usize>> {
        let mut sentences = Vec::new();
        let mut start: Option<usize> = None;
        let mut iter = text.char_indices().peekable();

        while let Some((idx, c)) = iter.next() {
            if start.is_none() {
                if c.is_whitespace() {
                    continue;
                }
                start = Some(idx);
            }

            if !TERMINATORS.contains(&c) {
                continue;
            }

            // Consume the whole run of terminal punctuation
            let mut after = idx + c.len_utf8();
            while let Some(&(next_idx, next)) = iter.peek() {
                if !TERMINATORS.contains(&next) {
                    break;
                }
                after = next_idx + next.len_utf8();
                iter.next();
            }

            if c == '.' && after == idx + 1 && Self::is_abbreviation(text, idx) {
                continue;
            }

            let Some(end) = Self::sentence_end(text, after) else {
                continue;
            };

            if let Some(begin) = start.take() {
                sentences.push(begin..end);
            }
            while iter.peek().is_some_and(|&(i, _)| i < end) {
                iter.next();
            }
        }

        if let Some(begin) = start {
            let end = begin + text[begin..].trim_end().len();
            if end > begin {
                sentences.push(begin..end);
            }
        }

        sentences
    }
}

/// Map each citation id to the cleaned text of the sentence holding its marker
///
/// When a marker's sentence is empty once markup is removed, the previous
/// sentence is used instead. Some segmenters split a lone trailing marker
/// into a sentence of its own.
pub fn attribute_sentences(
    response: &str,
    segmenter: &dyn SentenceSegmenter,
) -> Result<HashMap<String, String>, ParseError> {
    let sentences = segmenter.segment(response);
    let mut by_citation: HashMap<String, String> = HashMap::new();
    let mut sentence_of: HashMap<String, usize> = HashMap::new();

    let sentences = sentences
        .into_iter()
        .map(|range| {
            response
                .get(range.clone())
                .ok_or(ParseError::InvalidSentenceRange {
                    begin: range.start,
                    end: range.end,
                    len: response.len(),
                })
        })
        .collect::<Result<Vec<&str>, ParseError>>()?;

    for (idx, &sentence) in sentences.iter().enumerate() {

        for marker in find_markers(sentence) {
            if let Some(&seen) = sentence_of.get(marker.id) {
                if seen != idx {
                    return Err(ParseError::AmbiguousSentence {
                        citation_id: marker.id.to_string(),
                    });
                }
                continue;
            }

            let mut cleaned = strip_markers(sentence);
            if cleaned.is_empty() {
                if idx == 0 {
                    return Err(ParseError::EmptySentence {
                        citation_id: marker.id.to_string(),
                    });
                }
                tracing::debug!(
                    stage = "sentences",
                    id = marker.id,
                    "marker sentence is empty, using previous sentence"
                );
                cleaned = strip_markers(sentences[idx - 1]);
            }

            sentence_of.insert(marker.id.to_string(), idx);
            by_citation.insert(marker.id.to_string(), cleaned);
        }
    }

    Ok(by_citation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<&str> {
        PunctuationSegmenter
            .segment(text)
            .into_iter()
            .map(|r| &text[r])
            .collect()
    }

    #[test]
    fn test_basic_sentences() {
        assert_eq!(
            split("Dogs bark. Cats meow!  Do birds sing?"),
            vec!["Dogs bark.", "Cats meow!", "Do birds sing?"]
        );
    }

    #[test]
    fn test_unterminated_tail() {
        assert_eq!(split("One. two  "), vec!["One.", "two"]);
        assert!(split("   ").is_empty());
    }

    #[test]
    fn test_markers_stay_with_preceding_sentence() {
        assert_eq!(
            split("Dogs bark.<co>1</co> Cats meow. <co>2</co><co>3</co>\nBirds sing."),
            vec![
                "Dogs bark.<co>1</co>",
                "Cats meow. <co>2</co><co>3</co>",
                "Birds sing."
            ]
        );
    }

    #[test]
    fn test_abbreviations_and_initials() {
        assert_eq!(
            split("Dr. Smith met J. Doe, e.g. at work. Then left."),
            vec!["Dr. Smith met J. Doe, e.g. at work.", "Then left."]
        );
    }

    #[test]
    fn test_decimal_and_closers() {
        assert_eq!(
            split("It costs 3.5 dollars. \"Really?\" she asked."),
            vec!["It costs 3.5 dollars.", "\"Really?\"", "she asked."]
        );
    }

    #[test]
    fn test_attribution() {
        let response = "Dogs bark.<co>1</co> Cats meow.<co>2</co>";
        let map = attribute_sentences(response, &PunctuationSegmenter).unwrap();
        assert_eq!(map["1"], "Dogs bark.");
        assert_eq!(map["2"], "Cats meow.");
    }

    #[test]
    fn test_repeated_marker_in_one_sentence() {
        let map = attribute_sentences("A<co>1</co> b<co>1</co>", &PunctuationSegmenter).unwrap();
        assert_eq!(map["1"], "Ab");
    }

    #[test]
    fn test_marker_in_two_sentences_is_fatal() {
        let err = attribute_sentences("Dogs bark.<co>1</co> Cats meow.<co>1</co>", &PunctuationSegmenter)
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::AmbiguousSentence {
                citation_id: "1".to_string()
            }
        );
    }

    #[test]
    fn test_empty_sentence_falls_back_to_previous() {
        // Splits a lone trailing marker into its own sentence
        let quirky = |text: &str| {
            let cut = text.find("<co>").unwrap_or(text.len());
            vec![0..cut, cut..text.len()]
        };
        let map = attribute_sentences("Dogs bark. <co>1</co>", &quirky).unwrap();
        assert_eq!(map["1"], "Dogs bark. ");
    }

    #[test]
    fn test_empty_first_sentence_is_fatal() {
        let err = attribute_sentences("<co>1</co>", &PunctuationSegmenter).unwrap_err();
        assert_eq!(
            err,
            ParseError::EmptySentence {
                citation_id: "1".to_string()
            }
        );
    }

    #[test]
    fn test_out_of_range_sentence_is_an_error() {
        let overlong = |text: &str| vec![0..text.len() + 5];
        let err = attribute_sentences("A dog.<co>1</co>", &overlong).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidSentenceRange {
                begin: 0,
                end: 21,
                len: 16
            }
        );
    }

    #[test]
    fn test_split_character_sentence_is_an_error() {
        let mid_char = |_: &str| vec![0..1usize];
        let err = attribute_sentences("é<co>1</co>", &mid_char).unwrap_err();
        assert!(matches!(err, ParseError::InvalidSentenceRange { end: 1, .. }));
    }
}
