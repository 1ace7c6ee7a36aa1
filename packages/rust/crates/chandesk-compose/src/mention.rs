//! `@mention` autocomplete over the verified-user list.

use serde::{Deserialize, Serialize};

use crate::edit::{Selection, TextEdit, char_slice, splice};
use crate::error::ComposeError;
use crate::model::User;

/// An `@` run being typed, ending at the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionQuery {
    /// Character offset of the `@`.
    pub at: usize,
    /// Characters typed after the `@`, up to the caret.
    pub query: String,
}

impl MentionQuery {
    /// Character range covering `@query`.
    #[must_use]
    pub fn range(&self) -> Selection {
        Selection::new(self.at, self.at + 1 + self.query.chars().count())
    }
}

/// Finds the mention being typed at `cursor`.
///
/// The `@` must start the text or follow whitespace, and nothing between it
/// and the caret may be whitespace; `name@host` never opens the dropdown.
#[must_use]
pub fn active_mention_query(text: &str, cursor: usize) -> Option<MentionQuery> {
    let before: Vec<char> = char_slice(text, Selection::new(0, cursor)).chars().collect();
    let at = before.iter().rposition(|ch| *ch == '@')?;
    let query = &before[at + 1..];
    if query.iter().any(|ch| ch.is_whitespace()) {
        return None;
    }
    if at > 0 && !before[at - 1].is_whitespace() {
        return None;
    }
    Some(MentionQuery {
        at,
        query: query.iter().collect(),
    })
}

/// Users matching `query` by username or full name, case-insensitively.
/// An empty query lists everyone.
#[must_use]
pub fn filter_mention_candidates<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return users.iter().collect();
    }
    users
        .iter()
        .filter(|user| {
            user.username()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
                || user.display_name().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Replaces the typed `@query` with `@username` of the chosen user.
pub fn insert_mention(
    text: &str,
    query: &MentionQuery,
    user: &User,
) -> Result<TextEdit, ComposeError> {
    let username = user
        .username()
        .ok_or(ComposeError::MissingUsername(user.id))?;
    Ok(splice(text, query.range(), &format!("@{username}")))
}

/// Users mentioned in the current post, unique by id, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MentionedUsers {
    users: Vec<User>,
}

impl MentionedUsers {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `user`; returns `false` when already present.
    pub fn add(&mut self, user: User) -> bool {
        if self.users.iter().any(|existing| existing.id == user.id) {
            return false;
        }
        self.users.push(user);
        true
    }

    /// Removes the user with `id`; returns whether one was removed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.users.len();
        self.users.retain(|user| user.id != id);
        self.users.len() != before
    }

    /// Mentioned users in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    /// Usernames of mentioned users that have one.
    #[must_use]
    pub fn usernames(&self) -> Vec<String> {
        self.users
            .iter()
            .filter_map(User::username)
            .map(str::to_string)
            .collect()
    }

    /// Number of mentioned users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// True when nobody is mentioned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
