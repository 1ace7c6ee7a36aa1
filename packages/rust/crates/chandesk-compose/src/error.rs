//! Error types for composition and desk-state persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while editing or assembling a post.
#[derive(Error, Debug)]
pub enum ComposeError {
    /// Hashtag input was empty or contained whitespace.
    #[error("invalid hashtag: {0:?}")]
    InvalidHashtag(String),
    /// Link command issued without text or URL.
    #[error("link text and URL are both required")]
    EmptyLink,
    /// Mention target has no Telegram username to insert.
    #[error("user {0} has no Telegram username")]
    MissingUsername(i64),
    /// Schedule string did not match `YYYY-MM-DDTHH:MM`.
    #[error("invalid schedule time {0:?}: expected YYYY-MM-DDTHH:MM")]
    InvalidSchedule(String),
    /// Schedule time is not after the current time.
    #[error("scheduled time {0} is in the past")]
    ScheduleInPast(String),
    /// Visible post length exceeds what Telegram accepts.
    #[error("post is {len} characters long; Telegram allows {limit}")]
    TooLong {
        /// Visible characters in the post.
        len: usize,
        /// Applicable Telegram limit.
        limit: usize,
    },
    /// Neither title nor content is present.
    #[error("post has neither a title nor content")]
    EmptyPost,
}

/// Errors raised by [`crate::DeskStore`] implementations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the state file failed.
    #[error("desk state I/O failed for {path}: {source}")]
    Io {
        /// State file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// State file exists but is not valid desk-state JSON.
    #[error("desk state at {path} is not valid JSON: {source}")]
    Parse {
        /// State file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// Serializing the state failed.
    #[error("failed to serialize desk state: {0}")]
    Serialize(#[from] serde_json::Error),
    /// In-memory store lock was poisoned by a panicking writer.
    #[error("desk state lock poisoned")]
    Poisoned,
}
