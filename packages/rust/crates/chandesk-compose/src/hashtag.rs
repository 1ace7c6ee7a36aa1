use std::fmt;

use serde::{Deserialize, Serialize};

use crate::edit::{Selection, TextEdit, splice};
use crate::error::ComposeError;

/// A reusable `#tag`, always stored with its leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hashtag(String);

impl Hashtag {
    /// Parses operator input: trims it and adds `#` when missing.
    pub fn parse(input: &str) -> Result<Self, ComposeError> {
        let trimmed = input.trim();
        let body = trimmed.trim_start_matches('#');
        if body.is_empty() || body.chars().any(char::is_whitespace) {
            return Err(ComposeError::InvalidHashtag(input.to_string()));
        }
        Ok(Self(format!("#{body}")))
    }

    /// Tag text including the `#`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Hashtag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Saved hashtags, unique and in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashtagBook {
    tags: Vec<Hashtag>,
}

impl HashtagBook {
    /// Adds `tag`; returns `false` when it was already saved.
    pub fn add(&mut self, tag: Hashtag) -> bool {
        if self.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Removes `tag`; returns whether it was saved.
    pub fn remove(&mut self, tag: &Hashtag) -> bool {
        let before = self.tags.len();
        self.tags.retain(|saved| saved != tag);
        self.tags.len() != before
    }

    /// True when `tag` is saved.
    #[must_use]
    pub fn contains(&self, tag: &Hashtag) -> bool {
        self.tags.contains(tag)
    }

    /// Saved tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Hashtag> {
        self.tags.iter()
    }

    /// Number of saved tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True when no tag is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Appends `tag` to the end of `text`, separated by one space when the text
/// is not empty. The caret moves to the end.
#[must_use]
pub fn append_hashtag(text: &str, tag: &Hashtag) -> TextEdit {
    let end = text.chars().count();
    let insert = if text.is_empty() {
        tag.to_string()
    } else {
        format!(" {tag}")
    };
    splice(text, Selection::caret(end), &insert)
}
