//! Meshy text/image-to-3D API client.
//!
//! Pure pass-through: requests are forwarded with the configured bearer
//! credential and the upstream JSON body is handed back untouched. No
//! retries; any non-2xx status becomes an `UpstreamError`.

use crate::config::MeshyConfig;
use metrics::counter;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use service_core::error::AppError;
use service_core::observability::{TracedClientExt, TracedRequest};
use std::time::Duration;

#[derive(Clone)]
pub struct MeshyClient {
    client: Client,
    config: MeshyConfig,
}

impl MeshyClient {
    pub fn new(config: MeshyConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Failed to build Meshy HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// Check if the API key is set.
    pub fn is_configured(&self) -> bool {
        !self.config.api_key.expose_secret().is_empty()
    }

    pub async fn text_to_3d(
        &self,
        prompt: &str,
        options: Map<String, Value>,
    ) -> Result<Value, AppError> {
        let mut body = options;
        body.insert("prompt".to_string(), Value::String(prompt.to_string()));

        let url = self.url("/text-to-3d");
        self.execute("text_to_3d", self.client.traced_post(&url).json(&body))
            .await
    }

    pub async fn image_to_3d(
        &self,
        image_url: &str,
        options: Map<String, Value>,
    ) -> Result<Value, AppError> {
        let mut body = options;
        body.insert(
            "image_url".to_string(),
            Value::String(image_url.to_string()),
        );

        let url = self.url("/image-to-3d");
        self.execute("image_to_3d", self.client.traced_post(&url).json(&body))
            .await
    }

    pub async fn task_status(&self, task_id: &str) -> Result<Value, AppError> {
        let url = self.url(&format!("/tasks/{}", urlencoding::encode(task_id)));
        self.execute("task_status", self.client.traced_get(&url))
            .await
    }

    pub async fn download(&self, task_id: &str) -> Result<Value, AppError> {
        let url = self.url(&format!("/tasks/{}/download", urlencoding::encode(task_id)));
        self.execute("download", self.client.traced_get(&url)).await
    }

    pub async fn usage(&self) -> Result<Value, AppError> {
        let url = self.url("/usage");
        self.execute("usage", self.client.traced_get(&url)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn execute(&self, operation: &'static str, request: TracedRequest) -> Result<Value, AppError> {
        let result = self.send(operation, request).await;

        let outcome = if result.is_ok() { "success" } else { "error" };
        counter!("meshy_requests_total", "operation" => operation, "outcome" => outcome)
            .increment(1);

        result
    }

    async fn send(&self, operation: &'static str, request: TracedRequest) -> Result<Value, AppError> {
        if !self.is_configured() {
            tracing::warn!(operation, "Meshy API key not configured");
            return Err(AppError::UpstreamError {
                status: None,
                message: "Meshy API key is not configured".to_string(),
            });
        }

        let response = request
            .bearer_auth(self.config.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(operation, error = %e, "Meshy request failed");
                AppError::UpstreamError {
                    status: None,
                    message: "Meshy request failed".to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(operation, status = %status, "Meshy returned an error status");
            return Err(AppError::UpstreamError {
                status: Some(status.as_u16()),
                message: format!("HTTP error! status: {}", status.as_u16()),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Failed to decode Meshy response");
            AppError::UpstreamError {
                status: Some(status.as_u16()),
                message: "Invalid response from Meshy".to_string(),
            }
        })?;

        tracing::debug!(operation, status = %status, "Meshy request completed");
        Ok(body)
    }
}
