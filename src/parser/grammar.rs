//! Small scanning helpers shared by the section parsers.

/// A forward-only cursor over a string slice
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Everything not yet consumed
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Consume `literal` if the remaining text starts with it
    pub fn eat(&mut self, literal: &str) -> bool {
        if self.rest().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Consume a non-empty run of ASCII digits
    pub fn eat_digits(&mut self) -> Option<&'a str> {
        let len = self.rest().bytes().take_while(|b| b.is_ascii_digit()).count();
        if len == 0 {
            return None;
        }
        let digits = &self.rest()[..len];
        self.pos += len;
        Some(digits)
    }

    /// Consume the first of `options` the remaining text starts with
    pub fn eat_any<'o>(&mut self, options: &[&'o str]) -> Option<&'o str> {
        let found = options.iter().copied().find(|o| self.rest().starts_with(o))?;
        self.pos += found.len();
        Some(found)
    }

    /// Consume any run of whitespace, including none
    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }
}

/// Cut `text` into entries, one per start offset
///
/// Each entry runs from its start to one character before the next start,
/// or to the end of the text for the last entry. The dropped character is
/// normally the line break separating entries.
pub fn segment_entries<'a>(text: &'a str, starts: &[usize]) -> Vec<&'a str> {
    starts
        .iter()
        .enumerate()
        .map(|(i, &begin)| {
            let end = match starts.get(i + 1) {
                Some(&next) => text[..next]
                    .char_indices()
                    .next_back()
                    .map(|(idx, _)| idx)
                    .unwrap_or(0)
                    .max(begin),
                None => text.len(),
            };
            &text[begin..end]
        })
        .collect()
}
