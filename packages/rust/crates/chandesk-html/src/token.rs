//! Lenient tokenizer for editable-region markup.
//!
//! Never fails: anything that does not form a complete tag is returned as
//! text, so a stray `<` survives as a character instead of eating content.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Text(&'a str),
    Open {
        /// Lower-cased tag name.
        name: String,
        /// Raw attribute source between the name and `>`.
        attrs: &'a str,
    },
    Close {
        name: String,
    },
    /// Comments, doctypes and processing instructions.
    Markup,
}

pub(crate) fn tokenize(html: &str) -> Vec<Token<'_>> {
    let bytes = html.as_bytes();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'<' {
            pos += 1;
            continue;
        }
        let Some((token, next)) = scan_tag(html, pos) else {
            pos += 1;
            continue;
        };
        if text_start < pos {
            tokens.push(Token::Text(&html[text_start..pos]));
        }
        tokens.push(token);
        pos = next;
        text_start = next;
    }

    if text_start < bytes.len() {
        tokens.push(Token::Text(&html[text_start..]));
    }
    tokens
}

/// Scans a tag starting at `start` (which holds `<`). Returns the token and
/// the byte offset just past it, or `None` when the `<` is plain text.
fn scan_tag(html: &str, start: usize) -> Option<(Token<'_>, usize)> {
    let rest = &html[start..];
    let bytes = rest.as_bytes();

    if rest.starts_with("<!--") {
        let end = rest[4..]
            .find("-->")
            .map_or(html.len(), |offset| start + 4 + offset + 3);
        return Some((Token::Markup, end));
    }
    if matches!(bytes.get(1), Some(b'!' | b'?')) {
        let end = rest.find('>')?;
        return Some((Token::Markup, start + end + 1));
    }

    let closing = bytes.get(1) == Some(&b'/');
    let name_start = if closing { 2 } else { 1 };
    if !bytes.get(name_start).is_some_and(u8::is_ascii_alphabetic) {
        return None;
    }
    let name_end = bytes[name_start..]
        .iter()
        .position(|byte| !is_tag_name_byte(*byte))
        .map_or(bytes.len(), |offset| name_start + offset);
    let tag_end = find_tag_end(bytes, name_end)?;
    let name = rest[name_start..name_end].to_ascii_lowercase();

    let token = if closing {
        Token::Close { name }
    } else {
        Token::Open {
            name,
            attrs: rest[name_end..tag_end]
                .trim_end()
                .trim_end_matches('/')
                .trim_end(),
        }
    };
    Some((token, start + tag_end + 1))
}

fn is_tag_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b':' | b'_')
}

/// Position of the `>` ending a tag, skipping `>` inside quoted attribute
/// values.
fn find_tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (offset, byte) in bytes[from..].iter().enumerate() {
        match (quote, *byte) {
            (Some(open), current) if open == current => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(*byte),
            (None, b'>') => return Some(from + offset),
            // A new tag starting before this one closed: treat as text.
            (None, b'<') => return None,
            (None, _) => {}
        }
    }
    None
}

/// Looks up one attribute value in raw attribute source. Names compare
/// ASCII-case-insensitively; valueless attributes yield an empty string.
pub(crate) fn attribute_value<'a>(attrs: &'a str, wanted: &str) -> Option<&'a str> {
    let bytes = attrs.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        while pos < bytes.len() && (bytes[pos].is_ascii_whitespace() || bytes[pos] == b'/') {
            pos += 1;
        }
        let name_start = pos;
        while pos < bytes.len()
            && !bytes[pos].is_ascii_whitespace()
            && !matches!(bytes[pos], b'=' | b'/')
        {
            pos += 1;
        }
        let name = &attrs[name_start..pos];
        if name.is_empty() {
            // Stray `=` with no name; step over it.
            pos += 1;
            continue;
        }
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }

        let mut value = "";
        if bytes.get(pos) == Some(&b'=') {
            pos += 1;
            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            match bytes.get(pos) {
                Some(&quote @ (b'"' | b'\'')) => {
                    let value_start = pos + 1;
                    let value_end = bytes[value_start..]
                        .iter()
                        .position(|byte| *byte == quote)
                        .map_or(bytes.len(), |offset| value_start + offset);
                    value = &attrs[value_start..value_end];
                    pos = (value_end + 1).min(bytes.len());
                }
                Some(_) => {
                    let value_start = pos;
                    while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() {
                        pos += 1;
                    }
                    value = &attrs[value_start..pos];
                }
                None => {}
            }
        }

        if name.eq_ignore_ascii_case(wanted) {
            return Some(value);
        }
    }
    None
}
