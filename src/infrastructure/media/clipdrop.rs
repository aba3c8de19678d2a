//! Clipdrop text-to-image client

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::Form;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::ImageConfig;
use crate::infrastructure::media::types::{ImageGenerator, MediaError};

/// Clipdrop API client. The text-to-image endpoint takes a multipart form
/// with a single `prompt` field and answers with raw PNG bytes.
pub struct ClipdropClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ClipdropClient {
    pub fn new(config: &ImageConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_else(|e| {
                error!(error = %e, "Failed to build HTTP client with custom timeout, using default client");
                Client::new()
            });

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl ImageGenerator for ClipdropClient {
    async fn text_to_image(&self, prompt: &str) -> Result<Vec<u8>, MediaError> {
        let form = Form::new().text("prompt", prompt.to_string());

        debug!("Requesting text-to-image generation");

        let response = self
            .client
            .post(format!("{}/text-to-image/v1", self.base_url))
            .header("x-api-key", &self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, "Text-to-image API error: {}", text);
            return Err(MediaError::Generation(format!(
                "API error {}: {}",
                status, text
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
