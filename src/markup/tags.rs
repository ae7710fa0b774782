//! Inline citation markers (`<co>N</co>`).
//!
//! Scanning is done by hand over byte positions: a marker is the literal
//! open tag, one or more ASCII digits, and the literal close tag.

/// Opening tag of an inline citation marker
pub const OPEN_TAG: &str = "<co>";

/// Closing tag of an inline citation marker
pub const CLOSE_TAG: &str = "</co>";

/// One complete `<co>N</co>` marker found in a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker<'a> {
    /// Byte offset of the opening `<`
    pub begin: usize,
    /// Byte offset just past the closing `>`
    pub end: usize,
    /// The numeric id between the tags
    pub id: &'a str,
}

/// Try to read a complete marker starting exactly at `pos`
pub fn marker_at(text: &str, pos: usize) -> Option<Marker<'_>> {
    let rest = text.get(pos..)?;
    let after_open = rest.strip_prefix(OPEN_TAG)?;

    let digits = after_open
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }

    let after_digits = &after_open[digits..];
    if !after_digits.starts_with(CLOSE_TAG) {
        return None;
    }

    let id_begin = pos + OPEN_TAG.len();
    Some(Marker {
        begin: pos,
        end: id_begin + digits + CLOSE_TAG.len(),
        id: &text[id_begin..id_begin + digits],
    })
}

/// Find every complete marker in `text`, left to right
pub fn find_markers(text: &str) -> Vec<Marker<'_>> {
    let mut markers = Vec::new();
    let mut pos = 0;

    while let Some(found) = text[pos..].find(OPEN_TAG) {
        let candidate = pos + found;
        match marker_at(text, candidate) {
            Some(marker) => {
                pos = marker.end;
                markers.push(marker);
            }
            None => pos = candidate + OPEN_TAG.len(),
        }
    }

    markers
}

/// Remove every marker together with the whitespace immediately around it
///
/// Whitespace is consumed on both sides, so `"dog. <co>1</co> Cats"` becomes
/// `"dog.Cats"`. Removal repeats until no complete marker is left, since
/// joining the text around one marker can assemble a new one
/// (`"<co>1 <co>2</co> </co>"`). The result never contains a marker, which
/// makes the operation idempotent.
pub fn strip_markers(text: &str) -> String {
    let mut current = strip_once(text);
    while !find_markers(&current).is_empty() {
        current = strip_once(&current);
    }
    current
}

fn strip_once(text: &str) -> String {
    let markers = find_markers(text);
    if markers.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut copied_to = 0;

    for marker in markers {
        out.push_str(text[copied_to..marker.begin].trim_end());

        let tail = &text[marker.end..];
        copied_to = marker.end + (tail.len() - tail.trim_start().len());
    }

    out.push_str(&text[copied_to..]);
    out
}
