//! Separating chain-of-thought text from the response.
//!
//! Models asked to think out loud wrap their reasoning between a start
//! phrase and an end phrase. Either phrasing of each may be used.

/// Phrases that open the reasoning section
pub const THOUGHT_START: [&str; 2] = ["Here is my thought process:", "Here's my thought process:"];

/// Phrases that close the reasoning section and open the response
pub const RESPONSE_START: [&str; 2] = ["Here is my response:", "Here's my response:"];

/// Output split into optional reasoning and the response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasoningSplit {
    pub reasoning: Option<String>,
    pub response: String,
}

/// Earliest occurrence of any phrase at or after `from`: (begin, end)
fn find_earliest(text: &str, from: usize, phrases: &[&str]) -> Option<(usize, usize)> {
    phrases
        .iter()
        .filter_map(|p| text[from..].find(p).map(|i| (from + i, from + i + p.len())))
        .min_by_key(|&(begin, _)| begin)
}

/// Split reasoning from response
///
/// Needs a start phrase and a later end phrase; otherwise the whole output
/// is the response. Text before the start phrase is kept in the response.
pub fn split_reasoning(output: &str) -> ReasoningSplit {
    let whole = || ReasoningSplit {
        reasoning: None,
        response: output.trim().to_string(),
    };

    let Some((start_begin, start_end)) = find_earliest(output, 0, &THOUGHT_START) else {
        return whole();
    };
    let Some((end_begin, end_end)) = find_earliest(output, start_end, &RESPONSE_START) else {
        return whole();
    };

    let before = output[..start_begin].trim();
    let after = output[end_end..].trim();
    let response = match (before.is_empty(), after.is_empty()) {
        (true, _) => after.to_string(),
        (false, true) => before.to_string(),
        (false, false) => format!("{before} {after}"),
    };

    ReasoningSplit {
        reasoning: Some(output[start_end..end_begin].trim().to_string()),
        response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_markers() {
        let split = split_reasoning("Think think respond respond");
        assert_eq!(split.reasoning, None);
        assert_eq!(split.response, "Think think respond respond");
    }

    #[test]
    fn test_end_without_start() {
        let split = split_reasoning("Think think Here is my response: respond respond");
        assert_eq!(split.reasoning, None);
        assert_eq!(split.response, "Think think Here is my response: respond respond");
    }

    #[test]
    fn test_start_without_end() {
        let split = split_reasoning("Here is my thought process:\n\nrespond respond");
        assert_eq!(split.reasoning, None);
        assert_eq!(
            split.response,
            "Here is my thought process:\n\nrespond respond"
        );
    }

    #[test]
    fn test_full_split() {
        let split = split_reasoning(
            "Here is my thought process:\n\nThink think\nHere is my response:\n\nrespond respond",
        );
        assert_eq!(split.reasoning.as_deref(), Some("Think think"));
        assert_eq!(split.response, "respond respond");
    }

    #[test]
    fn test_mixed_phrasings() {
        let split = split_reasoning(
            "Here's my thought process:\n\nThink think\nHere's my response:\n\nrespond respond",
        );
        assert_eq!(split.reasoning.as_deref(), Some("Think think"));
        assert_eq!(split.response, "respond respond");

        let split = split_reasoning(
            "Here is my thought process: Think think Here's my response: respond respond",
        );
        assert_eq!(split.reasoning.as_deref(), Some("Think think"));
    }

    #[test]
    fn test_text_before_start_is_kept() {
        let split = split_reasoning(
            "something before Here is my thought process: Think think Here's my response: respond respond",
        );
        assert_eq!(split.reasoning.as_deref(), Some("Think think"));
        assert_eq!(split.response, "something before respond respond");
    }
}
