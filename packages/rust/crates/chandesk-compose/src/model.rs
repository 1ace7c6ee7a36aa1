//! Records exchanged with the backend.

#![allow(missing_docs)]

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Telegram user id; the backend sends it as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TelegramId {
    /// Numeric id.
    Numeric(i64),
    /// Id kept as text (empty form fields, legacy records).
    Text(String),
}

impl fmt::Display for TelegramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// Channel member as listed by `/users`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub telegram_id: Option<TelegramId>,
    pub telegram_username: Option<String>,
    pub fio: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub sur_name: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub office: Option<String>,
    pub date_of_birth: Option<String>,
    pub supervisor_id: Option<i64>,
    pub supervisor_name: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub is_admin: bool,
    pub is_superuser: bool,
    /// Only sent when creating a user or changing a password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl User {
    /// Full name: `fio` when present, else `last first sur`.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(fio) = self.fio.as_deref().map(str::trim)
            && !fio.is_empty()
        {
            return fio.to_string();
        }
        self.fio_sort_key()
    }

    /// `last first sur` with missing parts skipped.
    #[must_use]
    pub fn fio_sort_key(&self) -> String {
        [&self.last_name, &self.first_name, &self.sur_name]
            .into_iter()
            .filter_map(|part| part.as_deref().map(str::trim))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Telegram username without a leading `@`, if set.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.telegram_username
            .as_deref()
            .map(|name| name.trim().trim_start_matches('@'))
            .filter(|name| !name.is_empty())
    }

    /// Listing priority: superusers 3, admins 2, everyone else 1.
    #[must_use]
    pub fn priority(&self) -> u8 {
        if self.is_superuser {
            3
        } else if self.is_admin {
            2
        } else {
            1
        }
    }
}

/// Post as returned by `/posts` and `/posts/channel`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub date_publish: Option<String>,
    pub color_border: Option<String>,
    pub user_telegram_id: Option<TelegramId>,
    pub is_published: Option<bool>,
    /// Fields this desk does not interpret, kept for round trips.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Post {
    /// Publish time parsed from `date_publish`; RFC 3339, ISO local with or
    /// without seconds, and bare dates (midnight) are accepted.
    #[must_use]
    pub fn published_at(&self) -> Option<NaiveDateTime> {
        let raw = self.date_publish.as_deref()?.trim();
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
            return Some(with_offset.naive_local());
        }
        for format in [
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M",
        ] {
            if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(parsed);
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }
}

/// Authenticated operator as stored after `/login`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSession {
    pub token: Option<String>,
    #[serde(alias = "refreshToken")]
    pub refresh_token: Option<String>,
    pub telegram_id: Option<TelegramId>,
    pub username: Option<String>,
    pub role: Option<String>,
    pub is_superuser: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AuthSession {
    /// Bearer token to attach to requests, if any.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }

    /// Refresh token, if the backend issued one.
    #[must_use]
    pub fn refresh(&self) -> Option<&str> {
        self.refresh_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }

    /// True for operators with the superuser role or flag.
    #[must_use]
    pub fn is_superuser(&self) -> bool {
        self.is_superuser.unwrap_or(false) || self.role.as_deref() == Some("superuser")
    }
}
