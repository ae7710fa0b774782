//! Splitting raw model output into response, citations and hallucinations.

/// Section header that opens the citations block
pub const CITATIONS_HEADER: &str = "# Citations:";

/// Section header that opens the hallucinations block
pub const HALLUCINATIONS_HEADER: &str = "# Hallucinations:";

/// The three top-level regions of a model output, each trimmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blocks<'a> {
    pub response: &'a str,
    pub citations: &'a str,
    pub hallucinations: &'a str,
}

/// Split raw output on the hallucinations header, then split the head on
/// the citations header. Missing headers yield empty blocks; the first
/// occurrence of each header wins.
pub fn split_blocks(raw: &str) -> Blocks<'_> {
    let (head, hallucinations) = raw
        .split_once(HALLUCINATIONS_HEADER)
        .unwrap_or((raw, ""));

    let (response, citations) = head.split_once(CITATIONS_HEADER).unwrap_or((head, ""));

    Blocks {
        response: response.trim(),
        citations: citations.trim(),
        hallucinations: hallucinations.trim(),
    }
}
