use std::path::Path;

use chandesk_compose::{CreatePostRequest, ImageRef, Post};

use crate::client::{ApiCall, DeskClient};
use crate::endpoints;
use crate::error::ApiError;

impl DeskClient {
    /// Every post the backend knows, published or scheduled.
    pub async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.send_data(&ApiCall::get(endpoints::POSTS)).await
    }

    /// One post by id.
    pub async fn get_post(&self, id: i64) -> Result<Post, ApiError> {
        self.send_data(&ApiCall::get(endpoints::post(id))).await
    }

    /// Posts authored by user `user_id`.
    pub async fn user_posts(&self, user_id: i64) -> Result<Vec<Post>, ApiError> {
        self.send_data(&ApiCall::get(endpoints::user_posts(user_id)))
            .await
    }

    /// Creates a post; it is published at `date_publish`, or right away without one.
    pub async fn create_post(&self, request: &CreatePostRequest) -> Result<Post, ApiError> {
        let body = serde_json::to_value(request)
            .map_err(|error| ApiError::InvalidRequest(error.to_string()))?;
        self.send_data(&ApiCall::post(endpoints::POSTS).json(body))
            .await
    }

    /// Replaces post `id` with `request`.
    pub async fn update_post(
        &self,
        id: i64,
        request: &CreatePostRequest,
    ) -> Result<Post, ApiError> {
        let body = serde_json::to_value(request)
            .map_err(|error| ApiError::InvalidRequest(error.to_string()))?;
        self.send_data(&ApiCall::put(endpoints::post(id)).json(body))
            .await
    }

    /// Deletes post `id`.
    pub async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        self.send(&ApiCall::delete(endpoints::post(id))).await?;
        Ok(())
    }

    /// Publishes a post to the channel now; returns the backend's answer.
    pub async fn publish_post(&self, id: i64) -> Result<serde_json::Value, ApiError> {
        self.send(&ApiCall::post(endpoints::post_publish(id))).await
    }

    /// Posts as they currently appear in the Telegram channel.
    pub async fn channel_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.send_data(&ApiCall::get(endpoints::POSTS_CHANNEL))
            .await
    }

    /// Uploads image bytes; the backend draws a `color` border around it.
    pub async fn upload_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        color: &str,
    ) -> Result<ImageRef, ApiError> {
        if bytes.is_empty() {
            return Err(ApiError::InvalidRequest(format!(
                "image {filename} is empty"
            )));
        }
        let call = ApiCall::post(endpoints::POSTS_UPLOAD_IMAGE).upload(
            bytes,
            filename.to_string(),
            color.to_string(),
        );
        self.send_data(&call).await
    }

    /// Reads `path` and uploads it with [`Self::upload_image`].
    pub async fn upload_image_file(&self, path: &Path, color: &str) -> Result<ImageRef, ApiError> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("image")
            .to_string();
        let bytes = tokio::fs::read(path).await.map_err(|error| {
            ApiError::InvalidRequest(format!("failed to read image {}: {error}", path.display()))
        })?;
        self.upload_image(bytes, &filename, color).await
    }
}
