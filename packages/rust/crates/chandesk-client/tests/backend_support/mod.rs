#![allow(dead_code)]

mod bootstrap;
mod mock_backend;

#[allow(unused_imports)]
pub use mock_backend::{
    ACCESS_TOKEN, API_KEY, MockBackendState, REFRESH_TOKEN, REFRESHED_TOKEN, RecordedCall,
    spawn_mock_backend,
};
