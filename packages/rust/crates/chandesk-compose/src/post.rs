//! Create-post payload assembly.
//!
//! The body sent to the backend is built from the draft, the mentioned users
//! and the chosen hashtags, then run through the Telegram normalizer as a
//! whole so the final payload obeys the same rules as the editor content.

use std::fmt;
use std::str::FromStr;

use chandesk_html::{
    TELEGRAM_MAX_CAPTION_LENGTH, TELEGRAM_MAX_MESSAGE_LENGTH, TelegramHtmlNormalizer,
    escape_html_text, visible_len,
};
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::error::ComposeError;
use crate::hashtag::Hashtag;
use crate::model::TelegramId;

/// Post category; selects the image border color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    /// General announcement.
    #[default]
    Info,
    /// Regular rubric.
    Rubric,
    /// Challenge or contest.
    Challenge,
    /// Update to an earlier post.
    Update,
}

impl PostKind {
    /// All kinds in menu order.
    pub const ALL: [Self; 4] = [Self::Info, Self::Rubric, Self::Challenge, Self::Update];

    /// Kind named `name` (case-insensitive); unknown names map to `Info`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "rubric" => Self::Rubric,
            "challenge" => Self::Challenge,
            "update" => Self::Update,
            _ => Self::Info,
        }
    }

    /// Lower-case name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Rubric => "rubric",
            Self::Challenge => "challenge",
            Self::Update => "update",
        }
    }

    /// Border color sent as `color_border` and with image uploads.
    #[must_use]
    pub fn border_color(self) -> &'static str {
        match self {
            Self::Info => "#3498db",
            Self::Rubric => "#2ecc71",
            Self::Challenge => "#e67e22",
            Self::Update => "#f1c40f",
        }
    }
}

impl fmt::Display for PostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parts of a post before they are joined into the payload body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostBody {
    /// Plain-text title, rendered bold.
    pub title: String,
    /// Editor HTML.
    pub content: String,
    /// Telegram usernames, with or without `@`.
    pub mentions: Vec<String>,
    /// Hashtags appended after the mentions.
    pub hashtags: Vec<Hashtag>,
}

/// Joins `body` into Telegram HTML and normalizes the result.
#[must_use]
pub fn format_post_body(body: &PostBody, normalizer: &TelegramHtmlNormalizer) -> String {
    let mut out = String::new();
    let title = body.title.trim();
    if !title.is_empty() {
        out.push_str("<b>");
        out.push_str(&escape_html_text(title));
        out.push_str("</b>\n");
    }
    out.push('\n');
    out.push_str(&normalizer.normalize(&body.content));
    out.push('\n');
    for username in &body.mentions {
        let username = username.trim().trim_start_matches('@');
        if !username.is_empty() {
            out.push('@');
            out.push_str(&escape_html_text(username));
            out.push(' ');
        }
    }
    out.push_str("\n\n");
    for tag in &body.hashtags {
        out.push_str(&escape_html_text(tag.as_str()));
        out.push(' ');
    }
    normalizer.normalize(&out)
}

/// Rejects `content` whose visible length exceeds the Telegram limit: the
/// caption limit when an image is attached, the message limit otherwise.
pub fn check_length(content: &str, has_image: bool) -> Result<(), ComposeError> {
    let limit = if has_image {
        TELEGRAM_MAX_CAPTION_LENGTH
    } else {
        TELEGRAM_MAX_MESSAGE_LENGTH
    };
    let len = visible_len(content);
    if len > limit {
        return Err(ComposeError::TooLong { len, limit });
    }
    Ok(())
}

/// Local publish time, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduledAt(NaiveDateTime);

impl ScheduledAt {
    const FORMAT: &'static str = "%Y-%m-%dT%H:%M";

    /// Parses `YYYY-MM-DDTHH:MM`, optionally with `:SS` (seconds dropped).
    pub fn parse(input: &str) -> Result<Self, ComposeError> {
        let raw = input.trim();
        NaiveDateTime::parse_from_str(raw, Self::FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
            .ok()
            .and_then(|at| at.with_second(0))
            .and_then(|at| at.with_nanosecond(0))
            .map(Self)
            .ok_or_else(|| ComposeError::InvalidSchedule(input.to_string()))
    }

    /// Wraps an already-parsed time, dropping seconds.
    #[must_use]
    pub fn from_datetime(at: NaiveDateTime) -> Self {
        Self(
            at.with_second(0)
                .and_then(|at| at.with_nanosecond(0))
                .unwrap_or(at),
        )
    }

    /// Underlying local time.
    #[must_use]
    pub fn datetime(self) -> NaiveDateTime {
        self.0
    }

    /// Errors unless the time is strictly after `now`.
    pub fn ensure_future(self, now: NaiveDateTime) -> Result<Self, ComposeError> {
        if self.0 <= now {
            return Err(ComposeError::ScheduleInPast(self.to_string()));
        }
        Ok(self)
    }
}

impl fmt::Display for ScheduledAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for ScheduledAt {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ScheduledAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScheduledAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Uploaded image as referenced by a post; all fields empty without image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRef {
    /// Path on the backend host.
    pub file_path: String,
    /// Public URL.
    pub file_url: String,
    /// Stored file name.
    pub filename: String,
}

impl ImageRef {
    /// True when no image is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.file_path.is_empty() && self.file_url.is_empty() && self.filename.is_empty()
    }
}

/// Body of `POST /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostRequest {
    /// Plain-text title.
    pub title: String,
    /// Normalized Telegram HTML body.
    pub content: String,
    /// Uploaded image, empty when none.
    pub image_path: ImageRef,
    /// Author's Telegram id.
    pub user_telegram_id: Option<TelegramId>,
    /// Border color of the post kind.
    pub color_border: String,
    /// Scheduled publish time; publish immediately when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_publish: Option<ScheduledAt>,
}

/// Collects the pieces of a post and produces a [`CreatePostRequest`].
#[derive(Debug, Clone, Default)]
pub struct PostDraftBuilder {
    body: PostBody,
    kind: PostKind,
    image: ImageRef,
    author: Option<TelegramId>,
    schedule: Option<ScheduledAt>,
    normalizer: TelegramHtmlNormalizer,
}

impl PostDraftBuilder {
    /// Builder for `title` and editor `content`.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            body: PostBody {
                title: title.into(),
                content: content.into(),
                ..PostBody::default()
            },
            ..Self::default()
        }
    }

    /// Post kind; defaults to `Info`.
    #[must_use]
    pub fn kind(mut self, kind: PostKind) -> Self {
        self.kind = kind;
        self
    }

    /// Adds mentioned usernames.
    #[must_use]
    pub fn mentions<I, S>(mut self, usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body.mentions.extend(usernames.into_iter().map(Into::into));
        self
    }

    /// Adds hashtags.
    #[must_use]
    pub fn hashtags(mut self, tags: impl IntoIterator<Item = Hashtag>) -> Self {
        self.body.hashtags.extend(tags);
        self
    }

    /// Attaches an uploaded image; switches to the caption limit.
    #[must_use]
    pub fn image(mut self, image: ImageRef) -> Self {
        self.image = image;
        self
    }

    /// Author's Telegram id.
    #[must_use]
    pub fn author(mut self, telegram_id: Option<TelegramId>) -> Self {
        self.author = telegram_id;
        self
    }

    /// Publish time; `None` publishes immediately.
    #[must_use]
    pub fn schedule(mut self, at: Option<ScheduledAt>) -> Self {
        self.schedule = at;
        self
    }

    /// Normalizer used for content and the final body.
    #[must_use]
    pub fn normalizer(mut self, normalizer: TelegramHtmlNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Assembles the request; fails on an empty post or one that exceeds the
    /// Telegram length limit.
    pub fn build(self) -> Result<CreatePostRequest, ComposeError> {
        let content_blank = self.normalizer.normalize(&self.body.content).is_empty();
        if self.body.title.trim().is_empty() && content_blank {
            return Err(ComposeError::EmptyPost);
        }
        let content = format_post_body(&self.body, &self.normalizer);
        check_length(&content, !self.image.is_empty())?;
        debug!(
            kind = %self.kind,
            chars = visible_len(&content),
            scheduled = self.schedule.is_some(),
            "assembled post payload"
        );
        Ok(CreatePostRequest {
            title: self.body.title.trim().to_string(),
            content,
            image_path: self.image,
            user_telegram_id: self.author,
            color_border: self.kind.border_color().to_string(),
            date_publish: self.schedule,
        })
    }
}
