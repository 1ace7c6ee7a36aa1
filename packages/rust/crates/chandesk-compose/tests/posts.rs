#![allow(missing_docs)]

use chandesk_compose::{
    ComposeError, CreatePostRequest, Hashtag, ImageRef, PostBody, PostDraftBuilder, PostKind,
    ScheduledAt, TelegramId, check_length, format_post_body,
};
use chandesk_html::{NormalizeOptions, TelegramHtmlNormalizer};
use chrono::NaiveDate;

fn tag(name: &str) -> Hashtag {
    Hashtag::parse(name).expect("valid tag")
}

#[test]
fn kinds_map_to_border_colors() {
    assert_eq!(PostKind::Info.border_color(), "#3498db");
    assert_eq!(PostKind::Rubric.border_color(), "#2ecc71");
    assert_eq!(PostKind::Challenge.border_color(), "#e67e22");
    assert_eq!(PostKind::Update.border_color(), "#f1c40f");
    assert_eq!(PostKind::from_name("Challenge"), PostKind::Challenge);
    assert_eq!(PostKind::from_name("unknown"), PostKind::Info);
}

#[test]
fn body_joins_title_content_mentions_and_tags() {
    let body = PostBody {
        title: "Weekly".to_string(),
        content: "<div>Hello <strong>team</strong></div>".to_string(),
        mentions: vec!["alice".to_string(), "@bob".to_string()],
        hashtags: vec![tag("news"), tag("#it")],
    };
    let formatted = format_post_body(&body, &TelegramHtmlNormalizer::default());
    assert_eq!(
        formatted,
        "<b>Weekly</b>\n\nHello <b>team</b>\n@alice @bob\n\n#news #it"
    );
}

#[test]
fn body_without_extras_is_just_the_content() {
    let body = PostBody {
        content: "<p>Only text</p>".to_string(),
        ..PostBody::default()
    };
    assert_eq!(
        format_post_body(&body, &TelegramHtmlNormalizer::default()),
        "Only text"
    );
}

#[test]
fn title_markup_is_escaped() {
    let body = PostBody {
        title: "A < B & C".to_string(),
        content: "x".to_string(),
        ..PostBody::default()
    };
    assert_eq!(
        format_post_body(&body, &TelegramHtmlNormalizer::default()),
        "<b>A &lt; B &amp; C</b>\n\nx"
    );
}

#[test]
fn length_limit_depends_on_image() {
    let caption_sized = "a".repeat(1024);
    assert!(check_length(&caption_sized, true).is_ok());
    let too_long = format!("<b>{}</b>", "a".repeat(1025));
    assert!(matches!(
        check_length(&too_long, true),
        Err(ComposeError::TooLong {
            len: 1025,
            limit: 1024
        })
    ));
    assert!(check_length(&too_long, false).is_ok());
    assert!(check_length(&"a".repeat(4097), false).is_err());
}

#[test]
fn schedule_parses_and_drops_seconds() {
    let at = ScheduledAt::parse("2026-05-01T09:30:45").expect("with seconds");
    assert_eq!(at.to_string(), "2026-05-01T09:30");
    let at: ScheduledAt = "2026-05-01T09:30".parse().expect("minutes");
    assert_eq!(serde_json::to_string(&at).expect("json"), "\"2026-05-01T09:30\"");
    assert!(matches!(
        ScheduledAt::parse("tomorrow"),
        Err(ComposeError::InvalidSchedule(_))
    ));
}

#[test]
fn schedule_must_be_in_the_future() {
    let now = NaiveDate::from_ymd_opt(2026, 5, 1)
        .and_then(|day| day.and_hms_opt(9, 30, 0))
        .expect("valid time");
    let at = ScheduledAt::parse("2026-05-01T09:30").expect("parse");
    assert!(matches!(
        at.ensure_future(now),
        Err(ComposeError::ScheduleInPast(_))
    ));
    let later = ScheduledAt::parse("2026-05-01T09:31").expect("parse");
    assert_eq!(later.ensure_future(now).expect("future"), later);
}

#[test]
fn builder_assembles_request() {
    let request = PostDraftBuilder::new("Launch", "<div>We ship <em>today</em></div>")
        .kind(PostKind::Rubric)
        .mentions(["alice"])
        .hashtags([tag("release")])
        .author(Some(TelegramId::Numeric(42)))
        .schedule(ScheduledAt::parse("2030-01-02T03:04").ok())
        .build()
        .expect("valid post");

    assert_eq!(request.title, "Launch");
    assert_eq!(
        request.content,
        "<b>Launch</b>\n\nWe ship <i>today</i>\n@alice\n\n#release"
    );
    assert_eq!(request.color_border, "#2ecc71");
    assert!(request.image_path.is_empty());

    let json = serde_json::to_value(&request).expect("json");
    assert_eq!(json["user_telegram_id"], 42);
    assert_eq!(json["date_publish"], "2030-01-02T03:04");
    assert_eq!(json["image_path"]["file_url"], "");

    let round: CreatePostRequest = serde_json::from_value(json).expect("decode");
    assert_eq!(round, request);
}

#[test]
fn immediate_posts_omit_date_publish() {
    let request = PostDraftBuilder::new("", "text").build().expect("valid post");
    let json = serde_json::to_value(&request).expect("json");
    assert!(json.get("date_publish").is_none());
    assert_eq!(json["color_border"], "#3498db");
}

#[test]
fn builder_rejects_empty_posts() {
    let err = PostDraftBuilder::new("  ", "<div><br></div>")
        .build()
        .expect_err("empty");
    assert!(matches!(err, ComposeError::EmptyPost));
}

#[test]
fn image_posts_use_caption_limit() {
    let image = ImageRef {
        file_path: "/uploads/a.png".to_string(),
        file_url: "http://cdn/a.png".to_string(),
        filename: "a.png".to_string(),
    };
    let err = PostDraftBuilder::new("", "a".repeat(2000))
        .image(image)
        .build()
        .expect_err("caption too long");
    assert!(matches!(err, ComposeError::TooLong { limit: 1024, .. }));
}

#[test]
fn builder_honors_normalizer_options() {
    let keep = TelegramHtmlNormalizer::new(NormalizeOptions {
        collapse_duplicate_lines: false,
        ..NormalizeOptions::default()
    });
    let request = PostDraftBuilder::new("", "same<br>same")
        .normalizer(keep)
        .build()
        .expect("valid post");
    assert_eq!(request.content, "same\nsame");
}

#[test]
fn mention_and_hashtag_markup_is_escaped() {
    let body = PostBody {
        content: "x".to_string(),
        mentions: vec!["a&b".to_string()],
        hashtags: vec![tag("#a&b"), tag("<x>")],
        ..PostBody::default()
    };
    assert_eq!(
        format_post_body(&body, &TelegramHtmlNormalizer::default()),
        "x\n@a&amp;b\n\n#a&amp;b #&lt;x&gt;"
    );
}
