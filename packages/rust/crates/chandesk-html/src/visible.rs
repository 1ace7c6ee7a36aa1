use crate::token::{Token, tokenize};

/// Text Telegram displays for already-normalized HTML: tags removed and
/// character references decoded.
#[must_use]
pub fn visible_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    for token in tokenize(html) {
        if let Token::Text(run) = token {
            decode_entities_into(&mut text, run);
        }
    }
    text
}

/// Number of characters in [`visible_text`]; the unit Telegram's length
/// limits are expressed in.
#[must_use]
pub fn visible_len(html: &str) -> usize {
    visible_text(html).chars().count()
}

fn decode_entities_into(out: &mut String, run: &str) {
    let mut rest = run;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];
        match candidate
            .find(';')
            .and_then(|semi| decode_entity(&candidate[1..semi]).map(|ch| (ch, semi)))
        {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &candidate[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let digits = name.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_and_numeric_references() {
        assert_eq!(
            visible_text("a &lt;b&gt; &amp; &#39;c&#x27; &quot;"),
            "a <b> & 'c' \""
        );
    }

    #[test]
    fn leaves_unknown_references_alone() {
        assert_eq!(visible_text("AT&T &bogus; &#xZZ;"), "AT&T &bogus; &#xZZ;");
    }
}
