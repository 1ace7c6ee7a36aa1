use crate::constants::{NBSP_ENTITY, QUOTE_MARKERS};
use crate::normalize::NormalizeOptions;

/// Line stage. Runs after every tag has been resolved so that whitespace
/// exposed by a stripped tag is still trimmed.
///
/// Runs of blank lines inside the text are kept as authored; only the blank
/// lines at either end go away.
pub(crate) fn tidy_lines(rendered: &str, options: NormalizeOptions) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for raw_line in rendered.split('\n') {
        let mut line = trim_horizontal(raw_line);
        if options.strip_quote_markers {
            while let Some(rest) = strip_quote_marker(line) {
                line = trim_horizontal(rest);
            }
        }
        if options.collapse_duplicate_lines && !line.is_empty() && lines.last() == Some(&line) {
            continue;
        }
        lines.push(line);
    }

    let Some(first) = lines.iter().position(|line| !line.is_empty()) else {
        return String::new();
    };
    let last = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .unwrap_or(first);
    lines[first..=last].join("\n")
}

fn strip_quote_marker(line: &str) -> Option<&str> {
    QUOTE_MARKERS
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
}

/// Trims spaces, tabs, U+00A0 and `&nbsp;` from both ends of a line.
fn trim_horizontal(line: &str) -> &str {
    let mut trimmed = line;
    loop {
        let before = trimmed.len();
        trimmed = trimmed.trim_matches(is_horizontal_space);
        while let Some(rest) = trimmed.strip_prefix(NBSP_ENTITY) {
            trimmed = rest;
        }
        while let Some(rest) = trimmed.strip_suffix(NBSP_ENTITY) {
            trimmed = rest;
        }
        if trimmed.len() == before {
            return trimmed;
        }
    }
}

fn is_horizontal_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\u{a0}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tidy(text: &str) -> String {
        tidy_lines(text, NormalizeOptions::default())
    }

    #[test]
    fn trims_edges_of_every_line() {
        assert_eq!(tidy("  a \t\n\t b  "), "a\nb");
        assert_eq!(tidy("&nbsp; a&nbsp;\u{a0}"), "a");
    }

    #[test]
    fn keeps_interior_blank_runs() {
        assert_eq!(tidy("\n\na\n\n\nb\n\n"), "a\n\n\nb");
        assert_eq!(tidy("a\n \n\t\nb"), "a\n\n\nb");
    }

    #[test]
    fn strips_nested_quote_markers() {
        assert_eq!(tidy("> > deep\n&gt; escaped"), "deep\nescaped");
        assert_eq!(tidy(">no space"), ">no space");
    }

    #[test]
    fn collapses_adjacent_duplicates_only() {
        assert_eq!(tidy("a\na\na\nb\na"), "a\nb\na");
        assert_eq!(tidy("a\n\na"), "a\n\na");
    }

    #[test]
    fn duplicate_collapse_can_be_disabled() {
        let options = NormalizeOptions {
            collapse_duplicate_lines: false,
            ..NormalizeOptions::default()
        };
        assert_eq!(tidy_lines("a\na", options), "a\na");
    }

    #[test]
    fn whitespace_only_input_is_empty() {
        assert_eq!(tidy(" \n\t\n "), "");
    }
}
