//! chandesk: terminal desk for a Telegram channel.
//!
//! The binary drives `chandesk-client` against the backend and keeps the
//! draft, saved hashtags and login session in a local desk-state file.
//! This library half holds what the binary and its tests share: settings.
//!
//! Logging: set `RUST_LOG=chandesk_client=debug` to see request logs on stderr.

#![allow(missing_docs)]

mod settings;

pub use settings::{
    API_BASE_URL_ENV, API_KEY_ENV, ApiSettings, DeskSettings, EditorSettings, StoreSettings,
    config_home, load_settings, load_settings_from_paths, set_config_home_override,
    settings_paths,
};
