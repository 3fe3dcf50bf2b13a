//! Weft HTTP Client
//!
//! A type-safe HTTP client for the Weft REST API.
//!
//! # Example
//!
//! ```no_run
//! use weft_client::WeftClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = WeftClient::new("http://localhost:5000");
//!
//!     // Instantiate a scenario from its configuration and run it
//!     let scenario = client.create_scenario("monthly").await?;
//!     client.submit_scenario(&scenario.id).await?;
//!
//!     for job in client.list_jobs().await? {
//!         println!("{} {:?}", job.id, job.status);
//!     }
//!     Ok(())
//! }
//! ```

mod cycles;
mod data_nodes;
pub mod error;
mod jobs;
mod pipelines;
mod scenarios;
mod tasks;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use weft_core::convert::EntityKind;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// HTTP client for the Weft REST API
///
/// Every entity kind gets list, get, create and delete methods; tasks,
/// pipelines and scenarios can be submitted, data nodes read and written, and
/// jobs cancelled.
#[derive(Debug, Clone)]
pub struct WeftClient {
    /// Base URL of the service (e.g., "http://localhost:5000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl WeftClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the service, without the `/api/v1` prefix
    ///
    /// # Example
    /// ```
    /// use weft_client::WeftClient;
    ///
    /// let client = WeftClient::new("http://localhost:5000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint URL under `/api/v1`, each segment percent-encoded
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["api", "v1"])
            .extend(segments);
        Ok(url)
    }

    /// Check that the service is up
    pub async fn health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    // =============================================================================
    // Generic resource calls
    // =============================================================================

    async fn list<T: DeserializeOwned>(&self, kind: EntityKind) -> Result<Vec<T>> {
        let url = self.url(&[kind.collection()])?;
        let response = self.client.get(url).send().await?;

        Self::handle_response(response).await
    }

    async fn get<T: DeserializeOwned>(&self, kind: EntityKind, id: &str) -> Result<T> {
        let url = self.url(&[kind.collection(), id])?;
        let response = self.client.get(url).send().await?;

        let body: Value = Self::handle_response(response).await?;
        Self::unwrap_model(kind, body)
    }

    async fn create<T: DeserializeOwned>(&self, kind: EntityKind, config_id: &str) -> Result<T> {
        let url = self.url(&[kind.collection()])?;
        let response = self
            .client
            .post(url)
            .query(&[("config_id", config_id)])
            .send()
            .await?;

        let body: Value = Self::handle_response(response).await?;
        Self::unwrap_model(kind, body)
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<String> {
        let url = self.url(&[kind.collection(), id])?;
        let response = self.client.delete(url).send().await?;

        Self::handle_message(response).await
    }

    async fn submit(&self, kind: EntityKind, id: &str) -> Result<String> {
        let url = self.url(&[kind.collection(), "submit", id])?;
        let response = self.client.post(url).send().await?;

        Self::handle_message(response).await
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Turn a non-success status into an error carrying the server's message
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        tracing::debug!("API error {}: {}", status, error_text);
        Err(ClientError::api_error(
            status.as_u16(),
            Self::error_message(&error_text),
        ))
    }

    /// Message of an error body: the `message` field, or the whole body
    fn error_message(body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| body.to_string())
    }

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle a response whose body is a status message
    async fn handle_message(response: reqwest::Response) -> Result<String> {
        let body: Value = Self::handle_response(response).await?;
        body.get("message")
            .or_else(|| body.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ClientError::ParseError(format!("No message in response: {}", body)))
    }

    /// Pull the model out of a `{"<key>": model}` envelope
    fn unwrap_model<T: DeserializeOwned>(kind: EntityKind, mut body: Value) -> Result<T> {
        let model = body.get_mut(kind.key()).map(Value::take).ok_or_else(|| {
            ClientError::ParseError(format!("Missing '{}' in response", kind.key()))
        })?;
        serde_json::from_value(model)
            .map_err(|e| ClientError::ParseError(format!("Invalid {}: {}", kind.key(), e)))
    }
}
