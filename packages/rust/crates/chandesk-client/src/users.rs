use chandesk_compose::User;

use crate::client::{ApiCall, DeskClient};
use crate::endpoints;
use crate::error::{ApiError, GENERIC_SERVER_MESSAGE};

impl DeskClient {
    /// All users, optionally filtered server-side by `search`.
    pub async fn list_users(&self, search: Option<&str>) -> Result<Vec<User>, ApiError> {
        let mut call = ApiCall::get(endpoints::USERS);
        if let Some(search) = search.map(str::trim).filter(|search| !search.is_empty()) {
            call = call.query("search", search);
        }
        self.send_data(&call).await
    }

    /// Verified users; the mention dropdown source.
    pub async fn verified_users(&self) -> Result<Vec<User>, ApiError> {
        self.send_data(&ApiCall::get(endpoints::USERS_VERIFIED))
            .await
    }

    /// Users with only their name fields filled.
    pub async fn users_only_fio(&self) -> Result<Vec<User>, ApiError> {
        self.send_data(&ApiCall::get(endpoints::USERS_ONLY_FIO))
            .await
    }

    /// One user by id.
    pub async fn get_user(&self, id: i64) -> Result<User, ApiError> {
        self.send_data(&ApiCall::get(endpoints::user(id))).await
    }

    /// Creates a user; `user.password` must be set.
    pub async fn create_user(&self, user: &User) -> Result<User, ApiError> {
        if user.password.as_deref().is_none_or(str::is_empty) {
            return Err(ApiError::InvalidRequest(
                "a new user needs a password".to_string(),
            ));
        }
        let body = serde_json::to_value(user)
            .map_err(|error| ApiError::InvalidRequest(error.to_string()))?;
        self.send_data(&ApiCall::post(endpoints::USERS).json(body))
            .await
    }

    /// Updates user `id` with the fields of `user`.
    pub async fn update_user(&self, id: i64, user: &User) -> Result<User, ApiError> {
        let body = serde_json::to_value(user)
            .map_err(|error| ApiError::InvalidRequest(error.to_string()))?;
        self.send_data(&ApiCall::put(endpoints::user(id)).json(body))
            .await
    }

    /// Deletes user `id`.
    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.send(&ApiCall::delete(endpoints::user(id))).await?;
        Ok(())
    }

    /// Profile of the logged-in operator.
    pub async fn profile(&self) -> Result<User, ApiError> {
        self.send_data(&ApiCall::get(endpoints::USERS_PROFILE))
            .await
    }

    /// Backend-defined statistics for a user, returned as-is.
    pub async fn user_stats(&self, id: i64) -> Result<serde_json::Value, ApiError> {
        self.send_data(&ApiCall::get(endpoints::user_stats(id)))
            .await
    }

    /// Kicks the user from the Telegram channel.
    pub async fn remove_from_channel(&self, id: i64) -> Result<(), ApiError> {
        let body = self
            .send(&ApiCall::delete(endpoints::user_remove_from_channel(id)))
            .await?;
        if body.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
            let message = body
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or(GENERIC_SERVER_MESSAGE);
            return Err(ApiError::InvalidRequest(message.to_string()));
        }
        Ok(())
    }
}
