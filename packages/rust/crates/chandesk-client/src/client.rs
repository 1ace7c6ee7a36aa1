use std::sync::Arc;

use chandesk_compose::AuthSession;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::{ApiError, error_message};

/// Client for the desk backend.
///
/// Cheap to clone; clones share the session. Requests carry `X-API-KEY`
/// when configured and the session's bearer token when logged in.
#[derive(Debug, Clone)]
pub struct DeskClient {
    pub(crate) http: reqwest::Client,
    pub(crate) config: ApiConfig,
    pub(crate) session: Arc<RwLock<Option<AuthSession>>>,
}

fn build_http_client(config: &ApiConfig) -> reqwest::Client {
    match reqwest::Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .build()
    {
        Ok(client) => client,
        Err(error) => {
            warn!(
                error = %error,
                "failed to build backend HTTP client with timeouts; falling back to default client"
            );
            reqwest::Client::new()
        }
    }
}

/// Request body of one call.
#[derive(Debug, Clone)]
pub(crate) enum Payload {
    Empty,
    Json(serde_json::Value),
    /// Multipart image upload; kept as bytes so a replay can rebuild it.
    Upload {
        bytes: Vec<u8>,
        filename: String,
        color: String,
    },
}

/// One backend call, replayable after a token refresh.
#[derive(Debug, Clone)]
pub(crate) struct ApiCall {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) payload: Payload,
    pub(crate) refresh_on_unauthorized: bool,
}

impl ApiCall {
    pub(crate) fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            payload: Payload::Empty,
            refresh_on_unauthorized: true,
        }
    }

    pub(crate) fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub(crate) fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub(crate) fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub(crate) fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub(crate) fn json(mut self, body: serde_json::Value) -> Self {
        self.payload = Payload::Json(body);
        self
    }

    pub(crate) fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub(crate) fn upload(mut self, bytes: Vec<u8>, filename: String, color: String) -> Self {
        self.payload = Payload::Upload {
            bytes,
            filename,
            color,
        };
        self
    }

    /// Auth calls must not trigger the refresh-and-replay cycle themselves.
    pub(crate) fn without_refresh(mut self) -> Self {
        self.refresh_on_unauthorized = false;
        self
    }
}

impl DeskClient {
    /// Client for `config` with no session.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: build_http_client(&config),
            config,
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// Client resuming a stored session.
    #[must_use]
    pub fn with_session(config: ApiConfig, session: Option<AuthSession>) -> Self {
        let client = Self::new(config);
        Self {
            session: Arc::new(RwLock::new(session)),
            ..client
        }
    }

    /// Backend configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Current session, if logged in.
    pub async fn session(&self) -> Option<AuthSession> {
        self.session.read().await.clone()
    }

    /// True when a bearer token is held.
    pub async fn is_authenticated(&self) -> bool {
        self.session
            .read()
            .await
            .as_ref()
            .and_then(AuthSession::bearer_token)
            .is_some()
    }

    pub(crate) async fn set_session(&self, session: Option<AuthSession>) {
        *self.session.write().await = session;
    }

    /// Runs `call` and returns the decoded JSON body (`Null` when empty).
    ///
    /// A 401 on a refreshable call refreshes the session once and replays
    /// the call once; when that is impossible or fails, the session is
    /// cleared and [`ApiError::Unauthorized`] returned.
    pub(crate) async fn send(&self, call: &ApiCall) -> Result<serde_json::Value, ApiError> {
        let response = self.execute(call).await?;
        if response.status() != StatusCode::UNAUTHORIZED || !call.refresh_on_unauthorized {
            return decode_response(&call.path, response).await;
        }

        let can_refresh = self
            .session
            .read()
            .await
            .as_ref()
            .and_then(AuthSession::refresh)
            .is_some();
        if !can_refresh {
            debug!(path = %call.path, "unauthorized without refresh token");
            self.set_session(None).await;
            return Err(ApiError::Unauthorized);
        }
        if let Err(error) = self.refresh_session().await {
            warn!(path = %call.path, error = %error, "token refresh failed; session cleared");
            return Err(ApiError::Unauthorized);
        }

        let replay = self.execute(call).await?;
        if replay.status() == StatusCode::UNAUTHORIZED {
            self.set_session(None).await;
            return Err(ApiError::Unauthorized);
        }
        decode_response(&call.path, replay).await
    }

    /// Runs `call` once with no refresh handling.
    pub(crate) async fn send_once(&self, call: &ApiCall) -> Result<serde_json::Value, ApiError> {
        let response = self.execute(call).await?;
        decode_response(&call.path, response).await
    }

    /// Runs `call` and decodes the envelope's `data` as `T`.
    pub(crate) async fn send_data<T: DeserializeOwned>(
        &self,
        call: &ApiCall,
    ) -> Result<T, ApiError> {
        let body = self.send(call).await?;
        envelope_data(&call.path, body)
    }

    async fn execute(&self, call: &ApiCall) -> Result<reqwest::Response, ApiError> {
        let mut request = self
            .http
            .request(call.method.clone(), self.config.url(&call.path));
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if let Some(api_key) = self.config.api_key.as_deref() {
            request = request.header("X-API-KEY", api_key);
        }
        let token = self
            .session
            .read()
            .await
            .as_ref()
            .and_then(AuthSession::bearer_token)
            .map(str::to_string);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request = match &call.payload {
            Payload::Empty => request,
            Payload::Json(body) => request.json(body),
            Payload::Upload {
                bytes,
                filename,
                color,
            } => {
                let part = Part::bytes(bytes.clone()).file_name(filename.clone());
                let form = Form::new().part("file", part).text("color", color.clone());
                request.multipart(form)
            }
        };

        debug!(method = %call.method, path = %call.path, "backend request");
        request
            .send()
            .await
            .map_err(|error| ApiError::from_reqwest(&error))
    }
}

async fn decode_response(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<serde_json::Value, ApiError> {
    let status = response.status();
    let body_text = response
        .text()
        .await
        .map_err(|error| ApiError::from_reqwest(&error))?;
    let parsed = serde_json::from_str::<serde_json::Value>(&body_text).ok();

    if !status.is_success() {
        return Err(ApiError::Status {
            status,
            message: error_message(parsed.as_ref()),
            body: body_text,
        });
    }
    if body_text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    parsed.ok_or_else(|| ApiError::decode(endpoint, format!("body is not JSON: {body_text}")))
}

/// `data` of the `{ "data": ... }` envelope, or the whole body when the
/// endpoint answers without one.
pub(crate) fn envelope_data<T: DeserializeOwned>(
    endpoint: &str,
    body: serde_json::Value,
) -> Result<T, ApiError> {
    let data = match body {
        serde_json::Value::Object(mut map) => match map.remove("data") {
            Some(data) => data,
            None => serde_json::Value::Object(map),
        },
        other => other,
    };
    serde_json::from_value(data).map_err(|error| ApiError::decode(endpoint, error))
}
