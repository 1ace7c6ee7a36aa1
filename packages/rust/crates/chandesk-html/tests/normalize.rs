#![allow(missing_docs)]

use chandesk_html::{NormalizeOptions, TelegramHtmlNormalizer, prepare_telegram_html};

#[test]
fn editor_blocks_become_lines() {
    let rendered = prepare_telegram_html(
        "<div>Hello <b>world</b></div><div>Second <span class=\"x\">line</span></div>",
    );
    assert_eq!(rendered, "Hello <b>world</b>\nSecond line");
}

#[test]
fn div_pairs_become_single_breaks() {
    assert_eq!(prepare_telegram_html("<div>a</div><div>b</div>"), "a\nb");
}

#[test]
fn paragraph_edges_are_trimmed_but_interior_spaces_survive() {
    assert_eq!(prepare_telegram_html("<p>  spaced  </p>"), "spaced");
    assert_eq!(
        prepare_telegram_html("<p>  two  words  here </p>"),
        "two  words  here"
    );
}

#[test]
fn edge_breaks_are_trimmed() {
    assert_eq!(prepare_telegram_html("<br/>Text<br>"), "Text");
    assert_eq!(prepare_telegram_html("<BR />Text<Br>"), "Text");
}

#[test]
fn interior_blank_lines_are_preserved() {
    assert_eq!(prepare_telegram_html("a<br><br><br>b"), "a\n\n\nb");
    assert_eq!(
        prepare_telegram_html("<div>a</div><div><br></div><div><br></div><div>b</div>"),
        "a\n\n\n\nb"
    );
}

#[test]
fn quote_marker_is_stripped() {
    assert_eq!(prepare_telegram_html("> quoted text"), "quoted text");
    assert_eq!(
        prepare_telegram_html("<div>&gt; quoted</div><div>plain</div>"),
        "quoted\nplain"
    );
}

#[test]
fn anchor_keeps_only_href() {
    assert_eq!(
        prepare_telegram_html("<a href=\"https://x.com\" target=\"_blank\">link</a>"),
        "<a href=\"https://x.com\">link</a>"
    );
    assert_eq!(
        prepare_telegram_html("<A TARGET=_blank Href='https://x.com/?q=\"1\"'>q</A>"),
        "<a href=\"https://x.com/?q=&quot;1&quot;\">q</a>"
    );
}

#[test]
fn anchor_without_href_is_kept_bare() {
    assert_eq!(prepare_telegram_html("<a name=\"top\">x</a>"), "<a>x</a>");
}

#[test]
fn synonyms_fold_to_short_tags() {
    assert_eq!(prepare_telegram_html("<strong>bold</strong>"), "<b>bold</b>");
    assert_eq!(prepare_telegram_html("<em>x</em>"), "<i>x</i>");
    assert_eq!(prepare_telegram_html("<STRONG>y</Strong>"), "<b>y</b>");
}

#[test]
fn spans_are_erased() {
    assert_eq!(
        prepare_telegram_html("<span style=\"color:red\">hello</span>"),
        "hello"
    );
    assert_eq!(
        prepare_telegram_html("hi <span class=\"user-mention\">@alice</span>!"),
        "hi @alice!"
    );
}

#[test]
fn attributes_are_removed_from_formatting_tags() {
    assert_eq!(
        prepare_telegram_html("<b style=\"x\">a</b><i class=\"y\">b</i><u id=z>c</u><s>d</s>"),
        "<b>a</b><i>b</i><u>c</u><s>d</s>"
    );
}

#[test]
fn unknown_tags_are_stripped_keeping_text() {
    assert_eq!(
        prepare_telegram_html("<font color=red>red</font> <h1>Title</h1><img src=x.png>"),
        "red Title"
    );
    assert_eq!(
        prepare_telegram_html("<ul><li>one</li><li>two</li></ul>"),
        "onetwo"
    );
}

#[test]
fn nested_whitelisted_tags_are_not_flattened() {
    assert_eq!(
        prepare_telegram_html("<b><i>text</i></b>"),
        "<b><i>text</i></b>"
    );
    assert_eq!(
        prepare_telegram_html("<pre><code>let x = 1;</code></pre>"),
        "<pre><code>let x = 1;</code></pre>"
    );
}

#[test]
fn empty_input_gives_empty_output() {
    assert_eq!(prepare_telegram_html(""), "");
    assert_eq!(prepare_telegram_html("<div><br></div>"), "");
    assert_eq!(prepare_telegram_html("<span></span>"), "");
}

#[test]
fn whitespace_exposed_by_stripped_tags_is_trimmed() {
    assert_eq!(prepare_telegram_html("<div><h2>  x  </h2></div>"), "x");
}

#[test]
fn adjacent_duplicate_lines_collapse() {
    assert_eq!(
        prepare_telegram_html("<div>same</div><div>same</div><div>other</div>"),
        "same\nother"
    );
}

#[test]
fn duplicate_collapse_is_optional() {
    let normalizer = TelegramHtmlNormalizer::new(NormalizeOptions {
        collapse_duplicate_lines: false,
        ..NormalizeOptions::default()
    });
    assert_eq!(
        normalizer.normalize("<div>same</div><div>same</div>"),
        "same\nsame"
    );
}

#[test]
fn quote_stripping_is_optional() {
    let normalizer = TelegramHtmlNormalizer::new(NormalizeOptions {
        strip_quote_markers: false,
        ..NormalizeOptions::default()
    });
    assert_eq!(normalizer.normalize("> kept"), "> kept");
}

#[test]
fn unbalanced_formatting_is_repaired() {
    assert_eq!(prepare_telegram_html("<b>open"), "<b>open</b>");
    assert_eq!(prepare_telegram_html("<b>open<br><br>"), "<b>open</b>");
    assert_eq!(prepare_telegram_html("stray</i> close"), "stray close");
    assert_eq!(
        prepare_telegram_html("<b><i>x</b></i>"),
        "<b><i>x</i></b>"
    );
}

#[test]
fn stray_angle_brackets_are_escaped() {
    assert_eq!(prepare_telegram_html("1 < 2"), "1 &lt; 2");
    assert_eq!(prepare_telegram_html("a <b"), "a &lt;b");
}

#[test]
fn comments_from_pasted_content_are_dropped() {
    assert_eq!(
        prepare_telegram_html("<!--StartFragment-->pasted<!--EndFragment-->"),
        "pasted"
    );
}

#[test]
fn carriage_returns_become_line_breaks() {
    assert_eq!(prepare_telegram_html("a\r\nb\rc"), "a\nb\nc");
}

#[test]
fn mentions_and_hashtags_pass_through() {
    assert_eq!(
        prepare_telegram_html("<div>Ping @alice_b about #release</div>"),
        "Ping @alice_b about #release"
    );
}

#[test]
fn non_ascii_text_is_untouched() {
    assert_eq!(
        prepare_telegram_html("<div>Привет, <b>мир</b> 🚀</div>"),
        "Привет, <b>мир</b> 🚀"
    );
}

#[test]
fn collapsing_a_tagged_duplicate_keeps_tags_balanced() {
    assert_eq!(
        prepare_telegram_html("<div><i>a<br><i>a<br>b</i></i></div>"),
        "<i>a\nb</i>"
    );
    assert_eq!(prepare_telegram_html("<b><br><b><br></b></b>x"), "<b>\n</b>x");
}

#[test]
fn line_breaks_inside_href_are_dropped() {
    assert_eq!(
        prepare_telegram_html("<a href=\"https://x.com/a \n> b\">link</a>"),
        "<a href=\"https://x.com/a &gt; b\">link</a>"
    );
}
