//! chandesk-client - HTTP client for the channel desk backend
//!
//! Wraps the backend's REST API: login session with one-shot token refresh,
//! user administration, posts and image upload. Every response is expected
//! in the backend's `{ "data": ... }` envelope.
//!
//! # Architecture
//!
//! ```text
//! chandesk-client/src/
//! ├── lib.rs        # Re-exports (this file)
//! ├── config.rs     # ApiConfig and defaults
//! ├── error.rs      # ApiError
//! ├── endpoints.rs  # Endpoint paths
//! ├── client.rs     # DeskClient, request execution, 401 refresh-and-replay
//! ├── auth.rs       # login / logout / refresh_session
//! ├── users.rs      # /users endpoints
//! └── posts.rs      # /posts endpoints, image upload
//! ```

mod auth;
mod client;
mod config;
mod endpoints;
mod error;
mod posts;
mod users;

pub use client::DeskClient;
pub use config::{
    ApiConfig, DEFAULT_API_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
};
pub use error::ApiError;
