//! chandesk-compose - post composition model for the channel desk
//!
//! Everything between the operator's keystrokes and the create-post request:
//! mention autocomplete, the reusable hashtag book, formatting commands,
//! the draft, payload assembly (normalized through `chandesk-html`), the
//! user/post list views and the persisted desk state.
//!
//! # Architecture
//!
//! ```text
//! chandesk-compose/src/
//! ├── lib.rs       # Re-exports (this file)
//! ├── error.rs     # ComposeError, StoreError
//! ├── edit.rs      # Selection, TextEdit, char-offset helpers
//! ├── model.rs     # User, Post, TelegramId, AuthSession
//! ├── mention.rs   # @mention detection, filtering, insertion
//! ├── hashtag.rs   # Hashtag, HashtagBook
//! ├── format.rs    # Bold/italic/... wrapping, links, emoji
//! ├── draft.rs     # Draft
//! ├── post.rs      # PostKind, ScheduledAt, CreatePostRequest builder
//! ├── listing.rs   # Post date filter, pagination, user query/sort
//! └── store.rs     # DeskState persistence (JSON file / memory)
//! ```

mod draft;
mod edit;
mod error;
mod format;
mod hashtag;
mod listing;
mod mention;
mod model;
mod post;
mod store;

pub use draft::Draft;
pub use edit::{Selection, TextEdit};
pub use error::{ComposeError, StoreError};
pub use format::{EMOJI_PALETTE, Format, apply_format, insert_emoji, insert_link};
pub use hashtag::{Hashtag, HashtagBook, append_hashtag};
pub use listing::{
    DEFAULT_PER_PAGE, Page, PostFilter, SortConfig, SortDirection, SortKey, UserQuery,
};
pub use mention::{
    MentionQuery, MentionedUsers, active_mention_query, filter_mention_candidates,
    insert_mention,
};
pub use model::{AuthSession, Post, TelegramId, User};
pub use post::{
    CreatePostRequest, ImageRef, PostBody, PostDraftBuilder, PostKind, ScheduledAt,
    check_length, format_post_body,
};
pub use store::{DeskState, DeskStore, JsonFileStore, MemoryStore};
