use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use super::bootstrap::spawn_test_server;

pub const API_KEY: &str = "desk-key";
pub const ACCESS_TOKEN: &str = "access-1";
pub const REFRESH_TOKEN: &str = "refresh-1";
pub const REFRESHED_TOKEN: &str = "access-2";

type Reply = (StatusCode, Json<Value>);

#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub authorization: Option<String>,
    pub api_key: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
pub struct MockBackendState {
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
    /// Token the protected endpoints accept right now.
    pub valid_token: Arc<Mutex<String>>,
    pub refresh_allowed: Arc<Mutex<bool>>,
    pub logout_fails: Arc<Mutex<bool>>,
    pub upload_fields: Arc<Mutex<HashMap<String, String>>>,
}

impl Default for MockBackendState {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            valid_token: Arc::new(Mutex::new(ACCESS_TOKEN.to_string())),
            refresh_allowed: Arc::new(Mutex::new(true)),
            logout_fails: Arc::new(Mutex::new(false)),
            upload_fields: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl MockBackendState {
    /// Expire the current access token; only the refreshed one is accepted.
    pub async fn expire_access_token(&self) {
        *self.valid_token.lock().await = REFRESHED_TOKEN.to_string();
    }

    pub async fn paths(&self) -> Vec<String> {
        self.calls
            .lock()
            .await
            .iter()
            .map(|call| format!("{} {}", call.method, call.path))
            .collect()
    }

    async fn record(
        &self,
        method: &'static str,
        path: impl Into<String>,
        headers: &HeaderMap,
        body: Option<Value>,
    ) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        self.calls.lock().await.push(RecordedCall {
            method,
            path: path.into(),
            authorization: header("authorization"),
            api_key: header("x-api-key"),
            body,
        });
    }

    async fn authorized(&self, headers: &HeaderMap) -> bool {
        let expected = format!("Bearer {}", self.valid_token.lock().await);
        headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            == Some(expected.as_str())
    }
}

fn unauthorized() -> Reply {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Token expired"})),
    )
}

fn sample_users() -> Value {
    json!([
        {"id": 1, "fio": "Ivanov Ivan", "telegram_username": "ivan", "is_verified": true},
        {"id": 2, "fio": "Petrova Anna", "telegram_username": "anna", "is_verified": false,
         "is_admin": true, "telegram_id": "5005"},
    ])
}

async fn handle_login(
    State(state): State<MockBackendState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    state.record("POST", "/login", &headers, Some(body.clone())).await;
    if body.get("password").and_then(Value::as_str) != Some("secret") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid credentials"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"data": {
            "token": ACCESS_TOKEN,
            "refreshToken": REFRESH_TOKEN,
            "telegram_id": 42,
            "username": body.get("username"),
            "role": "admin",
            "department": "news"
        }})),
    )
}

async fn handle_logout(State(state): State<MockBackendState>, headers: HeaderMap) -> Reply {
    state.record("POST", "/logout", &headers, None).await;
    if *state.logout_fails.lock().await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "logout backend down"})),
        );
    }
    (StatusCode::OK, Json(json!({"message": "bye"})))
}

async fn handle_refresh(
    State(state): State<MockBackendState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    state
        .record("POST", "/refresh-token", &headers, Some(body.clone()))
        .await;
    let allowed = *state.refresh_allowed.lock().await;
    if !allowed || body.get("refreshToken").and_then(Value::as_str) != Some(REFRESH_TOKEN) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Refresh token invalid"})),
        );
    }
    (StatusCode::OK, Json(json!({"token": REFRESHED_TOKEN})))
}

async fn handle_users(
    State(state): State<MockBackendState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    let path = match query.get("search") {
        Some(search) => format!("/users?search={search}"),
        None => "/users".to_string(),
    };
    state.record("GET", path, &headers, None).await;
    if !state.authorized(&headers).await {
        return unauthorized();
    }
    let users = sample_users();
    let filtered: Vec<Value> = users
        .as_array()
        .into_iter()
        .flatten()
        .filter(|user| {
            query.get("search").is_none_or(|search| {
                user["fio"]
                    .as_str()
                    .is_some_and(|fio| fio.to_lowercase().contains(&search.to_lowercase()))
            })
        })
        .cloned()
        .collect();
    (StatusCode::OK, Json(json!({"data": filtered})))
}

async fn handle_user(
    State(state): State<MockBackendState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Reply {
    state.record("GET", format!("/users/{id}"), &headers, None).await;
    if !state.authorized(&headers).await {
        return unauthorized();
    }
    match sample_users()
        .as_array()
        .and_then(|users| users.iter().find(|user| user["id"] == id).cloned())
    {
        Some(user) => (StatusCode::OK, Json(json!({"data": user}))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": [{"msg": "User not found", "loc": ["path", "id"]}]})),
        ),
    }
}

async fn handle_remove_from_channel(
    State(state): State<MockBackendState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Reply {
    state
        .record("DELETE", format!("/users/{id}/remove-from-channel"), &headers, None)
        .await;
    if id == 2 {
        return (
            StatusCode::OK,
            Json(json!({"success": false, "message": "Bot is not a channel admin"})),
        );
    }
    (StatusCode::OK, Json(json!({"success": true})))
}

async fn handle_create_post(
    State(state): State<MockBackendState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    state.record("POST", "/posts", &headers, Some(body.clone())).await;
    if !state.authorized(&headers).await {
        return unauthorized();
    }
    let mut post = body;
    post["id"] = json!(7);
    post["is_published"] = json!(false);
    (StatusCode::CREATED, Json(json!({"data": post})))
}

async fn handle_list_posts(State(state): State<MockBackendState>, headers: HeaderMap) -> Reply {
    state.record("GET", "/posts", &headers, None).await;
    if !state.authorized(&headers).await {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({"data": [
            {"id": 1, "title": "One", "date_publish": "2026-03-01T10:00:00", "views": 10},
            {"id": 2, "title": "Two", "date_publish": null}
        ]})),
    )
}

async fn handle_delete_post(
    State(state): State<MockBackendState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> (StatusCode, String) {
    state.record("DELETE", format!("/posts/{id}"), &headers, None).await;
    (StatusCode::NO_CONTENT, String::new())
}

async fn handle_upload_image(
    State(state): State<MockBackendState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Reply {
    state
        .record("POST", "/posts/upload-image", &headers, None)
        .await;
    let mut fields = HashMap::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = if name == "file" {
            field.file_name().unwrap_or_default().to_string()
        } else {
            field.text().await.unwrap_or_default()
        };
        fields.insert(name, value);
    }
    let filename = fields.get("file").cloned().unwrap_or_default();
    *state.upload_fields.lock().await = fields;
    (
        StatusCode::OK,
        Json(json!({"data": {
            "file_path": format!("/srv/uploads/{filename}"),
            "file_url": format!("http://cdn.local/{filename}"),
            "filename": filename
        }})),
    )
}

pub async fn spawn_mock_backend()
-> Result<Option<(String, MockBackendState, tokio::task::JoinHandle<()>)>> {
    let state = MockBackendState::default();
    let api = Router::new()
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/refresh-token", post(handle_refresh))
        .route("/users", get(handle_users))
        .route("/users/{id}", get(handle_user))
        .route(
            "/users/{id}/remove-from-channel",
            delete(handle_remove_from_channel),
        )
        .route("/posts", get(handle_list_posts).post(handle_create_post))
        .route("/posts/{id}", delete(handle_delete_post))
        .route("/posts/upload-image", post(handle_upload_image))
        .with_state(state.clone());
    let app = Router::new().nest("/api/v1", api);
    spawn_test_server(
        app,
        state,
        "skipping desk client tests: local socket bind not permitted",
    )
    .await
}
