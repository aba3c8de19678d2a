//! Creation use cases
//!
//! Every metered operation follows the same shape: entitlement check first,
//! one synchronous provider call, exactly one Creation row persisted, then
//! (for quota-limited operations) the free-usage increment. Failures are
//! opaque and never retried.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::sync::Arc;

use crate::application::entitlement::{UsageMeter, ensure_premium};
use crate::application::errors::ApplicationError;
use crate::domain::creation::{
    Creation, CreationId, CreationKind, ICreationRepository, LikeOutcome, NewCreation,
};
use crate::domain::entitlement::Entitlement;
use crate::domain::identity::UserId;
use crate::infrastructure::llm::{ChatRequest, LlmProvider};
use crate::infrastructure::media::{ImageGenerator, MediaSource, MediaStore};
use crate::infrastructure::resume::ResumeParser;

const BLOG_TITLE_MAX_TOKENS: u32 = 100;
const RESUME_REVIEW_MAX_TOKENS: u32 = 1000;

const BACKGROUND_REMOVAL_PROMPT: &str = "Remove background from image";
const RESUME_REVIEW_PROMPT: &str = "Review the uploaded resume";

/// Quota-limited article generation.
pub struct GenerateArticleUseCase {
    provider: Arc<dyn LlmProvider>,
    creations: Arc<dyn ICreationRepository>,
    meter: Arc<UsageMeter>,
}

impl GenerateArticleUseCase {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        creations: Arc<dyn ICreationRepository>,
        meter: Arc<UsageMeter>,
    ) -> Self {
        Self {
            provider,
            creations,
            meter,
        }
    }

    pub async fn execute(
        &self,
        entitlement: &Entitlement,
        prompt: String,
        length: u32,
    ) -> Result<String, ApplicationError> {
        self.meter.ensure_within_quota(entitlement)?;

        let content = self
            .provider
            .complete(ChatRequest::new(prompt.clone(), length))
            .await?;

        self.creations
            .insert(NewCreation::new(
                entitlement.user_id.clone(),
                prompt,
                content.clone(),
                CreationKind::Article,
            ))
            .await?;

        self.meter.record(entitlement).await?;
        Ok(content)
    }
}

/// Quota-limited blog title generation.
pub struct GenerateBlogTitleUseCase {
    provider: Arc<dyn LlmProvider>,
    creations: Arc<dyn ICreationRepository>,
    meter: Arc<UsageMeter>,
}

impl GenerateBlogTitleUseCase {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        creations: Arc<dyn ICreationRepository>,
        meter: Arc<UsageMeter>,
    ) -> Self {
        Self {
            provider,
            creations,
            meter,
        }
    }

    pub async fn execute(
        &self,
        entitlement: &Entitlement,
        prompt: String,
    ) -> Result<String, ApplicationError> {
        self.meter.ensure_within_quota(entitlement)?;

        let content = self
            .provider
            .complete(ChatRequest::new(prompt.clone(), BLOG_TITLE_MAX_TOKENS))
            .await?;

        self.creations
            .insert(NewCreation::new(
                entitlement.user_id.clone(),
                prompt,
                content.clone(),
                CreationKind::BlogTitle,
            ))
            .await?;

        self.meter.record(entitlement).await?;
        Ok(content)
    }
}

/// Premium-only image generation: prompt to PNG, PNG to the media store,
/// secure URL persisted.
pub struct GenerateImageUseCase {
    generator: Arc<dyn ImageGenerator>,
    media: Arc<dyn MediaStore>,
    creations: Arc<dyn ICreationRepository>,
}

impl GenerateImageUseCase {
    pub fn new(
        generator: Arc<dyn ImageGenerator>,
        media: Arc<dyn MediaStore>,
        creations: Arc<dyn ICreationRepository>,
    ) -> Self {
        Self {
            generator,
            media,
            creations,
        }
    }

    pub async fn execute(
        &self,
        entitlement: &Entitlement,
        prompt: String,
        publish: bool,
    ) -> Result<String, ApplicationError> {
        ensure_premium(entitlement)?;

        let png = self.generator.text_to_image(&prompt).await?;
        let data_uri = format!("data:image/png;base64,{}", BASE64.encode(&png));
        let uploaded = self
            .media
            .upload(MediaSource::DataUri(data_uri), false)
            .await?;

        self.creations
            .insert(
                NewCreation::new(
                    entitlement.user_id.clone(),
                    prompt,
                    uploaded.secure_url.clone(),
                    CreationKind::Image,
                )
                .published(publish),
            )
            .await?;

        Ok(uploaded.secure_url)
    }
}

/// Premium-only background removal via an eager upload transformation.
pub struct RemoveBackgroundUseCase {
    media: Arc<dyn MediaStore>,
    creations: Arc<dyn ICreationRepository>,
}

impl RemoveBackgroundUseCase {
    pub fn new(media: Arc<dyn MediaStore>, creations: Arc<dyn ICreationRepository>) -> Self {
        Self { media, creations }
    }

    pub async fn execute(
        &self,
        entitlement: &Entitlement,
        image: Vec<u8>,
    ) -> Result<String, ApplicationError> {
        ensure_premium(entitlement)?;

        let uploaded = self.media.upload(MediaSource::Bytes(image), true).await?;

        self.creations
            .insert(NewCreation::new(
                entitlement.user_id.clone(),
                BACKGROUND_REMOVAL_PROMPT,
                uploaded.secure_url.clone(),
                CreationKind::Image,
            ))
            .await?;

        Ok(uploaded.secure_url)
    }
}

/// Premium-only object removal: plain upload, then a derived delivery URL
/// with the generative-remove transformation.
pub struct RemoveObjectUseCase {
    media: Arc<dyn MediaStore>,
    creations: Arc<dyn ICreationRepository>,
}

impl RemoveObjectUseCase {
    pub fn new(media: Arc<dyn MediaStore>, creations: Arc<dyn ICreationRepository>) -> Self {
        Self { media, creations }
    }

    pub async fn execute(
        &self,
        entitlement: &Entitlement,
        image: Vec<u8>,
        object: &str,
    ) -> Result<String, ApplicationError> {
        ensure_premium(entitlement)?;

        let uploaded = self.media.upload(MediaSource::Bytes(image), false).await?;
        let image_url = self.media.object_removal_url(&uploaded.public_id, object);

        self.creations
            .insert(NewCreation::new(
                entitlement.user_id.clone(),
                format!("Removed {} from image", object),
                image_url.clone(),
                CreationKind::Image,
            ))
            .await?;

        Ok(image_url)
    }
}

/// Premium-only resume review with the size bound checked before any
/// provider call.
pub struct ReviewResumeUseCase {
    provider: Arc<dyn LlmProvider>,
    parser: Arc<dyn ResumeParser>,
    creations: Arc<dyn ICreationRepository>,
    max_resume_bytes: usize,
}

impl ReviewResumeUseCase {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        parser: Arc<dyn ResumeParser>,
        creations: Arc<dyn ICreationRepository>,
        max_resume_bytes: usize,
    ) -> Self {
        Self {
            provider,
            parser,
            creations,
            max_resume_bytes,
        }
    }

    pub async fn execute(
        &self,
        entitlement: &Entitlement,
        resume: Vec<u8>,
    ) -> Result<String, ApplicationError> {
        ensure_premium(entitlement)?;

        if resume.len() > self.max_resume_bytes {
            return Err(ApplicationError::ResumeTooLarge);
        }

        let text = self.parser.extract_text(&resume)?;
        let prompt = format!(
            "Review the following resume and provide feedback:\n\n{}",
            text
        );

        let content = self
            .provider
            .complete(ChatRequest::new(prompt, RESUME_REVIEW_MAX_TOKENS))
            .await?;

        self.creations
            .insert(NewCreation::new(
                entitlement.user_id.clone(),
                RESUME_REVIEW_PROMPT,
                content.clone(),
                CreationKind::ResumeReview,
            ))
            .await?;

        Ok(content)
    }
}

/// The caller's own creations, newest first.
pub struct ListUserCreationsUseCase {
    creations: Arc<dyn ICreationRepository>,
}

impl ListUserCreationsUseCase {
    pub fn new(creations: Arc<dyn ICreationRepository>) -> Self {
        Self { creations }
    }

    pub async fn execute(&self, user: &UserId) -> Result<Vec<Creation>, ApplicationError> {
        Ok(self.creations.list_for_user(user).await?)
    }
}

/// All published creations, newest first.
pub struct ListPublishedCreationsUseCase {
    creations: Arc<dyn ICreationRepository>,
}

impl ListPublishedCreationsUseCase {
    pub fn new(creations: Arc<dyn ICreationRepository>) -> Self {
        Self { creations }
    }

    pub async fn execute(&self) -> Result<Vec<Creation>, ApplicationError> {
        Ok(self.creations.list_published().await?)
    }
}

/// Flip the caller's membership in a creation's likers set.
pub struct ToggleLikeUseCase {
    creations: Arc<dyn ICreationRepository>,
}

impl ToggleLikeUseCase {
    pub fn new(creations: Arc<dyn ICreationRepository>) -> Self {
        Self { creations }
    }

    pub async fn execute(
        &self,
        user: &UserId,
        id: CreationId,
    ) -> Result<LikeOutcome, ApplicationError> {
        self.creations
            .toggle_like(id, user)
            .await?
            .ok_or(ApplicationError::CreationNotFound)
    }
}
