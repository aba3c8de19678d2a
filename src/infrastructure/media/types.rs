//! Provider interfaces and error types for image generation and media storage

use async_trait::async_trait;

/// Stateless prompt-to-image transform.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Returns raw PNG bytes.
    async fn text_to_image(&self, prompt: &str) -> Result<Vec<u8>, MediaError>;
}

/// Image payload handed to the media store.
#[derive(Debug, Clone)]
pub enum MediaSource {
    /// Raw image bytes from a multipart upload or a generator
    Bytes(Vec<u8>),
    /// Already-encoded `data:image/...;base64,` URI
    DataUri(String),
}

/// A stored asset and its delivery URL.
#[derive(Debug, Clone)]
pub struct UploadedMedia {
    pub public_id: String,
    pub secure_url: String,
}

/// Blob store for images; uploads return URLs, transformations are derived.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload an image, optionally applying background removal eagerly.
    async fn upload(
        &self,
        source: MediaSource,
        remove_background: bool,
    ) -> Result<UploadedMedia, MediaError>;

    /// Delivery URL applying generative object removal to a stored asset.
    /// Purely derived; no network call.
    fn object_removal_url(&self, public_id: &str, object: &str) -> String;
}

/// Image provider / media store error
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Image generation failed: {0}")]
    Generation(String),

    #[error("Media upload failed: {0}")]
    Storage(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for MediaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MediaError::Timeout
        } else if err.is_connect() {
            MediaError::Network(format!("Connection failed: {}", err))
        } else {
            MediaError::Network(err.to_string())
        }
    }
}
