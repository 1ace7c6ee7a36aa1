use crate::lines::tidy_lines;
use crate::token::{Token, attribute_value, tokenize};

/// Switches for the optional line-level passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Collapse a line immediately followed by an identical line into one.
    pub collapse_duplicate_lines: bool,
    /// Drop leading `> ` quote markers, which Telegram shows verbatim.
    pub strip_quote_markers: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            collapse_duplicate_lines: true,
            strip_quote_markers: true,
        }
    }
}

/// Stateless converter from editable-region HTML to Telegram HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct TelegramHtmlNormalizer {
    options: NormalizeOptions,
}

impl TelegramHtmlNormalizer {
    /// Creates a normalizer with the given options.
    #[must_use]
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Options this normalizer applies.
    #[must_use]
    pub fn options(&self) -> NormalizeOptions {
        self.options
    }

    /// Normalizes `raw` into Telegram HTML. Total over all inputs and
    /// idempotent: feeding the output back returns it unchanged.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        let mut normalized = tidy_lines(&render_tokens(raw), self.options);
        if !self.options.collapse_duplicate_lines {
            return normalized;
        }
        // A collapsed line can take one half of a tag pair with it; re-render
        // until the output is balanced again. Every extra round collapses at
        // least one more line, so this stops.
        loop {
            let next = tidy_lines(&render_tokens(&normalized), self.options);
            if next == normalized {
                return next;
            }
            normalized = next;
        }
    }
}

/// Normalizes `raw` with [`NormalizeOptions::default`].
///
/// Only `b`, `i`, `u`, `s`, `a`, `code` and `pre` survive (`strong`/`em`
/// fold into `b`/`i`), anchors keep nothing but `href`, `div`/`p`/`br`
/// become `\n`, and the result carries no blank edge lines.
#[must_use]
pub fn prepare_telegram_html(raw: &str) -> String {
    TelegramHtmlNormalizer::default().normalize(raw)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineTag {
    Bold,
    Italic,
    Underline,
    Strike,
    Link,
    Code,
    Pre,
}

impl InlineTag {
    fn name(self) -> &'static str {
        match self {
            Self::Bold => "b",
            Self::Italic => "i",
            Self::Underline => "u",
            Self::Strike => "s",
            Self::Link => "a",
            Self::Code => "code",
            Self::Pre => "pre",
        }
    }
}

enum TagClass {
    Inline(InlineTag),
    /// `div` and `p`: the opening tag starts a new line.
    Block,
    LineBreak,
    /// Everything else, `span` included: dropped, content kept.
    Dropped,
}

fn classify(name: &str) -> TagClass {
    match name {
        "b" | "strong" => TagClass::Inline(InlineTag::Bold),
        "i" | "em" => TagClass::Inline(InlineTag::Italic),
        "u" => TagClass::Inline(InlineTag::Underline),
        "s" => TagClass::Inline(InlineTag::Strike),
        "a" => TagClass::Inline(InlineTag::Link),
        "code" => TagClass::Inline(InlineTag::Code),
        "pre" => TagClass::Inline(InlineTag::Pre),
        "div" | "p" => TagClass::Block,
        "br" => TagClass::LineBreak,
        _ => TagClass::Dropped,
    }
}

/// Token stage: emits whitelisted tags (balanced, attributes reduced to the
/// anchor `href`), turns block and break tags into `\n` and keeps text.
fn render_tokens(raw: &str) -> String {
    let mut rendered = String::with_capacity(raw.len());
    let mut open_tags: Vec<InlineTag> = Vec::new();

    for token in tokenize(raw) {
        match token {
            Token::Text(text) => push_text(&mut rendered, text),
            Token::Open { name, attrs } => match classify(&name) {
                TagClass::Inline(InlineTag::Link) => {
                    match attribute_value(attrs, "href") {
                        Some(href) => {
                            rendered.push_str("<a href=\"");
                            rendered.push_str(&escape_href(href));
                            rendered.push_str("\">");
                        }
                        None => rendered.push_str("<a>"),
                    }
                    open_tags.push(InlineTag::Link);
                }
                TagClass::Inline(tag) => {
                    push_open(&mut rendered, tag);
                    open_tags.push(tag);
                }
                TagClass::Block | TagClass::LineBreak => rendered.push('\n'),
                TagClass::Dropped => {}
            },
            Token::Close { name } => {
                if let TagClass::Inline(tag) = classify(&name)
                    && let Some(index) = open_tags.iter().rposition(|open| *open == tag)
                {
                    for inner in open_tags.drain(index..).rev() {
                        push_close(&mut rendered, inner);
                    }
                }
            }
            Token::Markup => {}
        }
    }

    if !open_tags.is_empty() {
        // Close before trailing breaks so they still trim as blank lines.
        let content_end = rendered.trim_end_matches(['\n', ' ', '\t']).len();
        let trailing = rendered.split_off(content_end);
        for tag in open_tags.into_iter().rev() {
            push_close(&mut rendered, tag);
        }
        rendered.push_str(&trailing);
    }
    rendered
}

fn push_open(rendered: &mut String, tag: InlineTag) {
    rendered.push('<');
    rendered.push_str(tag.name());
    rendered.push('>');
}

fn push_close(rendered: &mut String, tag: InlineTag) {
    rendered.push_str("</");
    rendered.push_str(tag.name());
    rendered.push('>');
}

fn push_text(rendered: &mut String, text: &str) {
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                rendered.push('\n');
            }
            '<' => rendered.push_str("&lt;"),
            _ => rendered.push(ch),
        }
    }
}

fn escape_href(href: &str) -> String {
    href.chars()
        .fold(String::with_capacity(href.len()), |mut escaped, ch| {
            match ch {
                // A line break inside the value would be split by the line stage.
                '\r' | '\n' => {}
                '"' => escaped.push_str("&quot;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                _ => escaped.push(ch),
            }
            escaped
        })
}
