/// Telegram's maximum length of a text message, in visible characters.
pub const TELEGRAM_MAX_MESSAGE_LENGTH: usize = 4096;

/// Telegram's maximum length of a media caption, in visible characters.
pub const TELEGRAM_MAX_CAPTION_LENGTH: usize = 1024;

pub(crate) const QUOTE_MARKERS: [&str; 2] = ["> ", "&gt; "];

pub(crate) const NBSP_ENTITY: &str = "&nbsp;";
