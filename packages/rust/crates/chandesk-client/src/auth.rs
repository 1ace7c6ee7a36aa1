use chandesk_compose::AuthSession;
use serde_json::json;
use tracing::{info, warn};

use crate::client::{ApiCall, DeskClient, envelope_data};
use crate::endpoints;
use crate::error::ApiError;

impl DeskClient {
    /// Logs in and keeps the returned session.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession, ApiError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ApiError::InvalidRequest(
                "username and password are required".to_string(),
            ));
        }
        let call = ApiCall::post(endpoints::LOGIN)
            .json(json!({ "username": username.trim(), "password": password }))
            .without_refresh();
        let session: AuthSession = self.send_data(&call).await?;
        if session.bearer_token().is_none() {
            return Err(ApiError::decode(endpoints::LOGIN, "response carries no token"));
        }
        info!(username = %username.trim(), "logged in");
        self.set_session(Some(session.clone())).await;
        Ok(session)
    }

    /// Logs out. The local session is cleared even when the backend call
    /// fails; that failure is only logged.
    pub async fn logout(&self) {
        let call = ApiCall::post(endpoints::LOGOUT).without_refresh();
        if let Err(error) = self.send(&call).await {
            warn!(error = %error, "logout request failed; clearing local session anyway");
        }
        self.set_session(None).await;
    }

    /// Exchanges the refresh token for a new session. Any failure clears the
    /// session.
    pub async fn refresh_session(&self) -> Result<AuthSession, ApiError> {
        let previous = self.session().await;
        let Some(refresh_token) = previous
            .as_ref()
            .and_then(AuthSession::refresh)
            .map(str::to_string)
        else {
            self.set_session(None).await;
            return Err(ApiError::Unauthorized);
        };

        let call = ApiCall::post(endpoints::REFRESH_TOKEN)
            .json(json!({ "refreshToken": refresh_token }))
            .without_refresh();
        let refreshed = self
            .send_once(&call)
            .await
            .and_then(|body| envelope_data::<AuthSession>(endpoints::REFRESH_TOKEN, body));
        let mut session = match refreshed {
            Ok(session) if session.bearer_token().is_some() => session,
            Ok(_) => {
                self.set_session(None).await;
                return Err(ApiError::Unauthorized);
            }
            Err(error) => {
                self.set_session(None).await;
                return Err(error);
            }
        };
        if session.refresh().is_none() {
            session.refresh_token = Some(refresh_token);
        }
        if session.telegram_id.is_none() {
            session.telegram_id = previous.and_then(|old| old.telegram_id);
        }
        self.set_session(Some(session.clone())).await;
        Ok(session)
    }
}
