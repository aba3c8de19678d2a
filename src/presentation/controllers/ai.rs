//! AI operation controllers
//!
//! All handlers answer HTTP 200 with the `{success, ...}` envelope; the
//! entitlement middleware has already attached the caller's plan and usage
//! counter by the time these run.

use axum::{
    Extension, Json,
    extract::{Multipart, State},
};
use std::collections::HashMap;

use crate::application::errors::ApplicationError;
use crate::domain::entitlement::Entitlement;
use crate::presentation::controllers::AppState;
use crate::presentation::middleware::failure_response;
use crate::presentation::models::{
    ApiResponse, GenerateArticleRequest, GenerateBlogTitleRequest, GenerateImageRequest,
};

/// Multipart form collected into named byte buffers.
async fn read_form(mut multipart: Multipart) -> Result<HashMap<String, Vec<u8>>, ApplicationError> {
    let mut parts = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApplicationError::Validation(format!("Malformed upload: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApplicationError::Validation(format!("Malformed upload: {}", e)))?;
        parts.insert(name, bytes.to_vec());
    }

    Ok(parts)
}

fn require_part(
    parts: &mut HashMap<String, Vec<u8>>,
    name: &str,
) -> Result<Vec<u8>, ApplicationError> {
    parts
        .remove(name)
        .ok_or_else(|| ApplicationError::Validation(format!("Missing {} upload", name)))
}

/// POST /api/ai/generate-article - quota-limited article generation
#[utoipa::path(
    post,
    path = "/api/ai/generate-article",
    request_body = GenerateArticleRequest,
    responses(
        (status = 200, description = "Envelope with generated article or failure message", body = ApiResponse),
        (status = 401, description = "Unauthenticated")
    ),
    tag = "ai"
)]
pub async fn generate_article(
    State(state): State<AppState>,
    Extension(entitlement): Extension<Entitlement>,
    Json(request): Json<GenerateArticleRequest>,
) -> Json<ApiResponse> {
    match state
        .generate_article
        .execute(&entitlement, request.prompt, request.length)
        .await
    {
        Ok(content) => Json(ApiResponse::content(content)),
        Err(e) => failure_response(e),
    }
}

/// POST /api/ai/generate-blog-title - quota-limited blog title generation
#[utoipa::path(
    post,
    path = "/api/ai/generate-blog-title",
    request_body = GenerateBlogTitleRequest,
    responses(
        (status = 200, description = "Envelope with generated title or failure message", body = ApiResponse),
        (status = 401, description = "Unauthenticated")
    ),
    tag = "ai"
)]
pub async fn generate_blog_title(
    State(state): State<AppState>,
    Extension(entitlement): Extension<Entitlement>,
    Json(request): Json<GenerateBlogTitleRequest>,
) -> Json<ApiResponse> {
    match state
        .generate_blog_title
        .execute(&entitlement, request.prompt)
        .await
    {
        Ok(content) => Json(ApiResponse::content(content)),
        Err(e) => failure_response(e),
    }
}

/// POST /api/ai/generate-image - premium-only image generation
#[utoipa::path(
    post,
    path = "/api/ai/generate-image",
    request_body = GenerateImageRequest,
    responses(
        (status = 200, description = "Envelope with stored image URL or failure message", body = ApiResponse),
        (status = 401, description = "Unauthenticated")
    ),
    tag = "ai"
)]
pub async fn generate_image(
    State(state): State<AppState>,
    Extension(entitlement): Extension<Entitlement>,
    Json(request): Json<GenerateImageRequest>,
) -> Json<ApiResponse> {
    match state
        .generate_image
        .execute(&entitlement, request.prompt, request.publish)
        .await
    {
        Ok(secure_url) => Json(ApiResponse::uploaded(secure_url)),
        Err(e) => failure_response(e),
    }
}

/// POST /api/ai/remove-image-background - premium-only background removal
#[utoipa::path(
    post,
    path = "/api/ai/remove-image-background",
    responses(
        (status = 200, description = "Envelope with stored image URL or failure message", body = ApiResponse),
        (status = 401, description = "Unauthenticated")
    ),
    tag = "ai"
)]
pub async fn remove_image_background(
    State(state): State<AppState>,
    Extension(entitlement): Extension<Entitlement>,
    multipart: Multipart,
) -> Json<ApiResponse> {
    let result = async {
        let mut parts = read_form(multipart).await?;
        let image = require_part(&mut parts, "image")?;
        state.remove_background.execute(&entitlement, image).await
    }
    .await;

    match result {
        Ok(secure_url) => Json(ApiResponse::uploaded(secure_url)),
        Err(e) => failure_response(e),
    }
}

/// POST /api/ai/remove-image-object - premium-only object removal
#[utoipa::path(
    post,
    path = "/api/ai/remove-image-object",
    responses(
        (status = 200, description = "Envelope with derived image URL or failure message", body = ApiResponse),
        (status = 401, description = "Unauthenticated")
    ),
    tag = "ai"
)]
pub async fn remove_image_object(
    State(state): State<AppState>,
    Extension(entitlement): Extension<Entitlement>,
    multipart: Multipart,
) -> Json<ApiResponse> {
    let result = async {
        let mut parts = read_form(multipart).await?;
        let image = require_part(&mut parts, "image")?;
        let object = require_part(&mut parts, "object")
            .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())?;
        if object.is_empty() {
            return Err(ApplicationError::Validation(
                "Missing object description".to_string(),
            ));
        }
        state
            .remove_object
            .execute(&entitlement, image, &object)
            .await
    }
    .await;

    match result {
        Ok(image_url) => Json(ApiResponse::derived(image_url)),
        Err(e) => failure_response(e),
    }
}

/// POST /api/ai/resume-review - premium-only resume review (≤ 5 MiB)
#[utoipa::path(
    post,
    path = "/api/ai/resume-review",
    responses(
        (status = 200, description = "Envelope with review text or failure message", body = ApiResponse),
        (status = 401, description = "Unauthenticated")
    ),
    tag = "ai"
)]
pub async fn resume_review(
    State(state): State<AppState>,
    Extension(entitlement): Extension<Entitlement>,
    multipart: Multipart,
) -> Json<ApiResponse> {
    let result = async {
        let mut parts = read_form(multipart).await?;
        let resume = require_part(&mut parts, "resume")?;
        state.review_resume.execute(&entitlement, resume).await
    }
    .await;

    match result {
        Ok(content) => Json(ApiResponse::content(content)),
        Err(e) => failure_response(e),
    }
}
