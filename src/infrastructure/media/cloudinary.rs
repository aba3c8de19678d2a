//! Cloudinary media store client

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};
use std::time::Duration;
use tracing::{debug, error};

use crate::config::MediaConfig;
use crate::infrastructure::media::types::{MediaError, MediaSource, MediaStore, UploadedMedia};

const BACKGROUND_REMOVAL_TRANSFORMATION: &str = "e_background_removal";

/// Cloudinary upload API client. Uploads are signed (SHA-1 over the sorted
/// parameters plus the API secret); transformation URLs are derived locally.
pub struct CloudinaryClient {
    client: Client,
    base_url: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

impl CloudinaryClient {
    pub fn new(config: &MediaConfig) -> Self {
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
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        }
    }

    fn upload_url(&self) -> String {
        format!("{}/{}/image/upload", self.base_url, self.cloud_name)
    }

    /// Signature over the alphabetically sorted signed parameters, then the
    /// API secret appended, SHA-1 hex encoded.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted: Vec<_> = params.to_vec();
        sorted.sort_by_key(|(name, _)| *name);

        let canonical = sorted
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha1::new();
        hasher.update(canonical.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl MediaStore for CloudinaryClient {
    async fn upload(
        &self,
        source: MediaSource,
        remove_background: bool,
    ) -> Result<UploadedMedia, MediaError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();

        let mut signed_params: Vec<(&str, &str)> = vec![("timestamp", timestamp.as_str())];
        if remove_background {
            signed_params.push(("transformation", BACKGROUND_REMOVAL_TRANSFORMATION));
        }
        let signature = self.sign(&signed_params);

        let mut form = Form::new()
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature);
        if remove_background {
            form = form.text("transformation", BACKGROUND_REMOVAL_TRANSFORMATION);
        }

        form = match source {
            MediaSource::Bytes(bytes) => form.part("file", Part::bytes(bytes).file_name("upload")),
            MediaSource::DataUri(uri) => form.text("file", uri),
        };

        debug!(remove_background, "Uploading image to media store");

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, "Media upload API error: {}", text);
            return Err(MediaError::Storage(format!(
                "API error {}: {}",
                status, text
            )));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::Storage(format!("JSON parse error: {}", e)))?;

        Ok(UploadedMedia {
            public_id: uploaded.public_id,
            secure_url: uploaded.secure_url,
        })
    }

    fn object_removal_url(&self, public_id: &str, object: &str) -> String {
        // Delivery URL with a generative-remove transformation segment;
        // spaces in the object prompt are URL-encoded.
        let prompt = object.trim().replace(' ', "%20");
        format!(
            "https://res.cloudinary.com/{}/image/upload/e_gen_remove:prompt_{}/{}",
            self.cloud_name, prompt, public_id
        )
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CloudinaryClient {
        let mut config = MediaConfig::default();
        config.cloud_name = "demo".to_string();
        config.api_key = "key".to_string();
        config.api_secret = "secret".to_string();
        CloudinaryClient::new(&config)
    }

    #[test]
    fn upload_url_includes_cloud_name() {
        assert_eq!(
            client().upload_url(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }

    #[test]
    fn signature_is_over_sorted_params() {
        let client = client();
        // transformation sorts before timestamp regardless of argument order
        let a = client.sign(&[("timestamp", "100"), ("transformation", "e_x")]);
        let b = client.sign(&[("transformation", "e_x"), ("timestamp", "100")]);
        assert_eq!(a, b);

        let mut hasher = Sha1::new();
        hasher.update(b"timestamp=100&transformation=e_x");
        hasher.update(b"secret");
        assert_eq!(a, hex::encode(hasher.finalize()));
    }

    #[test]
    fn object_removal_url_encodes_the_prompt() {
        let url = client().object_removal_url("abc123", "red car");
        assert_eq!(
            url,
            "https://res.cloudinary.com/demo/image/upload/e_gen_remove:prompt_red%20car/abc123"
        );
    }
}
