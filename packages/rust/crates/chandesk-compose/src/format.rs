use chandesk_html::escape_html_attr;

use crate::edit::{Selection, TextEdit, char_slice, splice};
use crate::error::ComposeError;

/// Inline formatting commands of the editor toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `<b>`
    Bold,
    /// `<i>`
    Italic,
    /// `<u>`
    Underline,
    /// `<s>`
    Strikethrough,
}

impl Format {
    fn tag(self) -> &'static str {
        match self {
            Self::Bold => "b",
            Self::Italic => "i",
            Self::Underline => "u",
            Self::Strikethrough => "s",
        }
    }
}

/// Emoji offered by the picker.
pub const EMOJI_PALETTE: &[&str] = &[
    "✅", "➕", "⚠️", "💻", "🚀", "💡", "📌", "💣", "👋", "👏", "🙌", "👊", "✌️", "🤝", "👀",
    "😊", "😂", "❤️", "👍", "🎉", "🔥", "✨", "🌟", "😍", "😎", "🤔", "🌞", "🌙", "⭐", "🌈",
    "🍀", "🌸", "🍕", "☕", "⚽", "🎮", "🎯", "🏆", "🏅", "🥇",
];

/// Wraps the selection in `format`'s tag. `None` when nothing is selected.
#[must_use]
pub fn apply_format(text: &str, selection: Selection, format: Format) -> Option<TextEdit> {
    let selected = char_slice(text, selection);
    if selected.is_empty() {
        return None;
    }
    let tag = format.tag();
    Some(splice(text, selection, &format!("<{tag}>{selected}</{tag}>")))
}

/// Inserts a link over the selection. The selected text is the label when
/// there is one, otherwise `link_text` is.
pub fn insert_link(
    text: &str,
    selection: Selection,
    link_text: &str,
    url: &str,
) -> Result<TextEdit, ComposeError> {
    let link_text = link_text.trim();
    let url = url.trim();
    if link_text.is_empty() || url.is_empty() {
        return Err(ComposeError::EmptyLink);
    }
    let selected = char_slice(text, selection);
    let label = if selected.is_empty() {
        link_text
    } else {
        selected
    };
    let anchor = format!(
        "<a href=\"{}\" target=\"_blank\">{label}</a>",
        escape_html_attr(url)
    );
    Ok(splice(text, selection, &anchor))
}

/// Inserts `emoji` at `cursor`.
#[must_use]
pub fn insert_emoji(text: &str, cursor: usize, emoji: &str) -> TextEdit {
    splice(text, Selection::caret(cursor), emoji)
}
