//! chandesk-html - Telegram HTML normalization for channel posts
//!
//! Converts the markup captured from a browser editable region (nested
//! `div`/`p` blocks, wrapper `span`s, pasted fragments, inserted links and
//! mentions) into the restricted HTML subset Telegram's `parse_mode=HTML`
//! accepts: `b`, `i`, `u`, `s`, `a href`, `code`, `pre` and `\n` line breaks.
//!
//! # Architecture
//!
//! ```text
//! chandesk-html/src/
//! ├── lib.rs        # Re-exports (this file)
//! ├── constants.rs  # Telegram limits
//! ├── escape.rs     # Plain text -> HTML escaping
//! ├── token.rs      # Lenient HTML tokenizer
//! ├── normalize.rs  # Token stage: whitelist, attributes, block breaks
//! ├── lines.rs      # Line stage: edge whitespace, quotes, duplicates
//! └── visible.rs    # Visible text / length as Telegram renders it
//! ```
//!
//! # Example
//!
//! ```rust
//! use chandesk_html::prepare_telegram_html;
//!
//! let html = prepare_telegram_html("<div>Hi <strong>there</strong></div><div><br></div>");
//! assert_eq!(html, "Hi <b>there</b>");
//! ```

mod constants;
mod escape;
mod lines;
mod normalize;
mod token;
mod visible;

pub use constants::{TELEGRAM_MAX_CAPTION_LENGTH, TELEGRAM_MAX_MESSAGE_LENGTH};
pub use escape::{escape_html_attr, escape_html_text};
pub use normalize::{NormalizeOptions, TelegramHtmlNormalizer, prepare_telegram_html};
pub use visible::{visible_len, visible_text};
