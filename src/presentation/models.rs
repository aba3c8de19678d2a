//! Wire models
//!
//! Every handler answers with [`ApiResponse`]: HTTP 200 plus a `success`
//! flag, with the result field name varying by operation kind. The varying
//! names are projections of one tagged payload type, so the front end keeps
//! reading `content`, `secure_url`, or `imageUrl` per endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::creation::{Creation, CreationKind};

// === Requests ===

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateArticleRequest {
    pub prompt: String,
    /// Token budget for the article body
    pub length: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateBlogTitleRequest {
    pub prompt: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateImageRequest {
    pub prompt: String,
    #[serde(default)]
    pub publish: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ToggleLikeRequest {
    /// Creation id as a UUID string
    pub id: String,
}

// === Responses ===

/// A creation row as served to the front end.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreationDto {
    pub id: Uuid,
    pub user_id: String,
    pub prompt: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: CreationKind,
    pub publish: bool,
    pub likers: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Creation> for CreationDto {
    fn from(creation: Creation) -> Self {
        Self {
            id: creation.id.as_uuid(),
            user_id: creation.user_id.into_string(),
            prompt: creation.prompt,
            content: creation.content,
            kind: creation.kind,
            publish: creation.publish,
            likers: creation.likers,
            created_at: creation.created_at,
        }
    }
}

/// Tagged result payload; the serialized field name depends on the variant.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ResponsePayload {
    /// Text results (`content`)
    Text { content: String },
    /// Stored media results (`secure_url`)
    Uploaded { secure_url: String },
    /// Derived transformation URLs (`imageUrl`)
    Derived {
        #[serde(rename = "imageUrl")]
        image_url: String,
    },
    /// Listing results (`creations`)
    Creations { creations: Vec<CreationDto> },
}

/// The one response envelope; callers inspect `success`, not the HTTP status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub payload: Option<ResponsePayload>,
}

impl ApiResponse {
    pub fn content(content: impl Into<String>) -> Self {
        Self::success(ResponsePayload::Text {
            content: content.into(),
        })
    }

    pub fn uploaded(secure_url: impl Into<String>) -> Self {
        Self::success(ResponsePayload::Uploaded {
            secure_url: secure_url.into(),
        })
    }

    pub fn derived(image_url: impl Into<String>) -> Self {
        Self::success(ResponsePayload::Derived {
            image_url: image_url.into(),
        })
    }

    pub fn creations(creations: Vec<Creation>) -> Self {
        Self::success(ResponsePayload::Creations {
            creations: creations.into_iter().map(CreationDto::from).collect(),
        })
    }

    /// Success with only an outcome label (the like-toggle).
    pub fn outcome(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            payload: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            payload: None,
        }
    }

    fn success(payload: ResponsePayload) -> Self {
        Self {
            success: true,
            message: None,
            payload: Some(payload),
        }
    }
}
