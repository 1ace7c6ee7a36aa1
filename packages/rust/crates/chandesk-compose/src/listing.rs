//! Post and user list views: date filter, pagination, search and sorting.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Post, User};

/// Posts per page when the caller does not choose.
pub const DEFAULT_PER_PAGE: usize = 10;

/// Inclusive publish-date window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Earliest publish day.
    pub from: Option<NaiveDate>,
    /// Latest publish day, whole day included.
    pub to: Option<NaiveDate>,
}

impl PostFilter {
    /// True when neither bound is set.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether `post` falls inside the window. Posts without a readable
    /// publish date only pass an unbounded filter.
    #[must_use]
    pub fn matches(&self, post: &Post) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(day) = post.published_at().map(|at| at.date()) else {
            return false;
        };
        self.from.is_none_or(|from| day >= from) && self.to.is_none_or(|to| day <= to)
    }

    /// Posts inside the window, in input order.
    #[must_use]
    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        posts.iter().filter(|post| self.matches(post)).collect()
    }
}

/// One page of a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: usize,
    /// Page size used.
    pub per_page: usize,
    /// Items across all pages.
    pub total_items: usize,
    /// `ceil(total_items / per_page)`.
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Cuts page `page` (1-based; 0 counts as 1) out of `items`. A zero
    /// `per_page` falls back to [`DEFAULT_PER_PAGE`]; pages past the end are
    /// empty.
    #[must_use]
    pub fn of(items: Vec<T>, page: usize, per_page: usize) -> Self {
        let per_page = if per_page == 0 {
            DEFAULT_PER_PAGE
        } else {
            per_page
        };
        let page = page.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(per_page);
        let start = (page - 1).saturating_mul(per_page);
        let items = items.into_iter().skip(start).take(per_page).collect();
        Self {
            items,
            page,
            per_page,
            total_items,
            total_pages,
        }
    }

    /// True when a later page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Column the user list is ordered by after role priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Role priority only.
    #[default]
    Priority,
    /// `last first sur` name.
    Fio,
    /// Telegram username.
    TelegramUsername,
    /// Verification flag.
    IsVerified,
    /// Admin flag.
    IsAdmin,
    /// Superuser flag.
    IsSuperuser,
    /// Active flag.
    IsActive,
}

impl SortKey {
    fn compare(self, a: &User, b: &User) -> Ordering {
        match self {
            Self::Priority => a.priority().cmp(&b.priority()),
            Self::Fio => a
                .fio_sort_key()
                .to_lowercase()
                .cmp(&b.fio_sort_key().to_lowercase()),
            Self::TelegramUsername => {
                let name = |user: &User| user.username().unwrap_or_default().to_lowercase();
                name(a).cmp(&name(b))
            }
            Self::IsVerified => a.is_verified.cmp(&b.is_verified),
            Self::IsAdmin => a.is_admin.cmp(&b.is_admin),
            Self::IsSuperuser => a.is_superuser.cmp(&b.is_superuser),
            Self::IsActive => a.is_active.cmp(&b.is_active),
        }
    }
}

/// Sort direction of the selected key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

/// Current user-list ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Selected key.
    pub key: SortKey,
    /// Selected direction.
    pub direction: SortDirection,
}

impl SortConfig {
    /// Ordering by `key` in `direction`.
    #[must_use]
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Column-header click: the same key ascending flips to descending,
    /// anything else sorts `key` ascending.
    pub fn toggle(&mut self, key: SortKey) {
        self.direction = if self.key == key && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        self.key = key;
    }

    fn compare(self, a: &User, b: &User) -> Ordering {
        let by_key = self.key.compare(a, b);
        let by_key = match self.direction {
            SortDirection::Asc => by_key,
            SortDirection::Desc => by_key.reverse(),
        };
        b.priority().cmp(&a.priority()).then(by_key)
    }
}

/// Search, verification filter and ordering of the user list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    /// Case-insensitive substring over `fio` and Telegram username.
    pub search: String,
    /// Hide unverified users.
    pub verified_only: bool,
    /// Ordering after role priority.
    pub sort: SortConfig,
}

impl UserQuery {
    fn matches(&self, user: &User) -> bool {
        if self.verified_only && !user.is_verified {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let contains = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|value| value.to_lowercase().contains(&needle))
        };
        contains(&user.fio) || contains(&user.telegram_username)
    }

    /// Matching users, superusers first, then admins, then everyone else,
    /// each group ordered by [`Self::sort`]. The sort is stable.
    #[must_use]
    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        let mut matched: Vec<&User> = users.iter().filter(|user| self.matches(user)).collect();
        matched.sort_by(|a, b| self.sort.compare(a, b));
        matched
    }
}
