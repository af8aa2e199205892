use async_trait::async_trait;
use chronica_common::model::{
    contact::ContactMessage,
    post::{CreatePost, Post},
};
use serde::Deserialize;
use thiserror::Error;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Message reported by the server in an error body.
    #[error("{0}")]
    Server(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Gateway to the HTTP API, abstracted so the controller can be driven by an
/// in-memory implementation in tests.
#[async_trait]
pub trait BlogApi: Send + Sync {
    async fn fetch_posts(&self) -> Result<Vec<Post>>;
    async fn create_post(&self, post: &CreatePost) -> Result<Post>;
    async fn send_contact(&self, message: &ContactMessage) -> Result<()>;
}

#[derive(Clone, Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url.trim_end_matches('/'))
    }

    /// Turns a non-success response into the server's `message`, falling back
    /// to a fixed message when the error body is unparseable.
    async fn checked(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map_or_else(|_| fallback.to_owned(), |body| body.message);
        Err(ApiError::Server(message))
    }
}

#[async_trait]
impl BlogApi for HttpApi {
    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let response = self.client.get(self.url("/blogs")).send().await?;
        let response = Self::checked(response, "Error loading blogs").await?;

        Ok(response.json().await?)
    }

    async fn create_post(&self, post: &CreatePost) -> Result<Post> {
        let response = self
            .client
            .post(self.url("/blogs"))
            .json(post)
            .send()
            .await?;
        let response = Self::checked(response, "Failed to post blog").await?;

        Ok(response.json().await?)
    }

    async fn send_contact(&self, message: &ContactMessage) -> Result<()> {
        let response = self
            .client
            .post(self.url("/contact"))
            .json(message)
            .send()
            .await?;
        Self::checked(response, "Failed to send message").await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::api::HttpApi;

    #[test]
    fn url_joins_without_doubled_slashes() {
        let api = HttpApi::new("http://localhost:3000/");
        assert_eq!(api.url("/blogs"), "http://localhost:3000/api/blogs");

        let api = HttpApi::new("http://localhost:3000");
        assert_eq!(api.url("/contact"), "http://localhost:3000/api/contact");
    }
}
