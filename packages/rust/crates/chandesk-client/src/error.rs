use reqwest::StatusCode;
use thiserror::Error;

/// Used when an error body carries no usable message.
pub(crate) const GENERIC_SERVER_MESSAGE: &str = "the server reported an error";

/// Errors returned by [`crate::DeskClient`].
#[derive(Error, Debug)]
pub enum ApiError {
    /// Backend answered with a non-success status.
    #[error("{status}: {message}")]
    Status {
        /// HTTP status.
        status: StatusCode,
        /// `message` or `detail` from the body, else a generic text.
        message: String,
        /// Raw response body.
        body: String,
    },
    /// Request never got a response (connect failure, timeout, ...).
    #[error("no response from server: {0}")]
    NoResponse(String),
    /// Response body did not have the expected shape.
    #[error("unexpected response from {endpoint}: {message}")]
    Decode {
        /// Endpoint path.
        endpoint: String,
        /// What went wrong.
        message: String,
    },
    /// Session missing, expired and not refreshable.
    #[error("not logged in or session expired")]
    Unauthorized,
    /// Request could not be built (unreadable upload, bad input).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::NoResponse(format!("timed out: {err}"))
        } else {
            Self::NoResponse(err.to_string())
        }
    }

    pub(crate) fn decode(endpoint: &str, message: impl std::fmt::Display) -> Self {
        Self::Decode {
            endpoint: endpoint.to_string(),
            message: message.to_string(),
        }
    }

    /// HTTP status for [`ApiError::Status`].
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Human message from an error body: `message`, then `detail` (string or
/// validation list), then the generic text.
pub(crate) fn error_message(data: Option<&serde_json::Value>) -> String {
    let Some(data) = data else {
        return GENERIC_SERVER_MESSAGE.to_string();
    };
    let from_str = |value: Option<&serde_json::Value>| {
        value
            .and_then(serde_json::Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };
    from_str(data.get("message"))
        .or_else(|| from_str(data.get("detail")))
        .or_else(|| {
            data.get("detail")
                .and_then(serde_json::Value::as_array)
                .and_then(|items| items.first())
                .and_then(|first| from_str(first.get("msg")))
        })
        .unwrap_or_else(|| GENERIC_SERVER_MESSAGE.to_string())
}
