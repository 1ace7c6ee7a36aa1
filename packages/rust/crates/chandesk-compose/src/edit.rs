/// Half-open character range `[start, end)` inside the editor text.
///
/// Offsets count `char`s, not bytes; reversed ranges are reordered and
/// out-of-range offsets clamp to the text length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// First selected character.
    pub start: usize,
    /// One past the last selected character.
    pub end: usize,
}

impl Selection {
    /// Selection spanning `start..end`.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Empty selection (a caret) at `at`.
    #[must_use]
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Ordered and clamped to a text of `len` characters.
    pub(crate) fn clamp(self, len: usize) -> Self {
        let (start, end) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        Self {
            start: start.min(len),
            end: end.min(len),
        }
    }

    /// True when nothing is selected.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// Result of an editing command: new text plus where the caret lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Full editor text after the command.
    pub text: String,
    /// Caret position (in characters) after the command.
    pub cursor: usize,
}

/// Replaces the characters of `range` with `insert`.
pub(crate) fn splice(text: &str, range: Selection, insert: &str) -> TextEdit {
    let range = range.clamp(text.chars().count());
    let start = byte_offset(text, range.start);
    let end = byte_offset(text, range.end);

    let mut spliced = String::with_capacity(text.len() + insert.len());
    spliced.push_str(&text[..start]);
    spliced.push_str(insert);
    spliced.push_str(&text[end..]);
    TextEdit {
        text: spliced,
        cursor: range.start + insert.chars().count(),
    }
}

pub(crate) fn char_slice(text: &str, range: Selection) -> &str {
    let range = range.clamp(text.chars().count());
    &text[byte_offset(text, range.start)..byte_offset(text, range.end)]
}

/// Byte offset of the `chars`-th character, or `text.len()` past the end.
pub(crate) fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(offset, _)| offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splice_counts_characters_not_bytes() {
        let edit = splice("привет мир", Selection::new(7, 10), "world");
        assert_eq!(edit.text, "привет world");
        assert_eq!(edit.cursor, 12);
    }

    #[test]
    fn reversed_and_overlong_selections_clamp() {
        assert_eq!(char_slice("abc", Selection::new(5, 1)), "bc");
        assert_eq!(splice("abc", Selection::caret(99), "!").text, "abc!");
    }
}
