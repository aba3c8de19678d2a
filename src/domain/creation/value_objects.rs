//! Creation value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Creation ID value object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreationId(pub Uuid);

impl CreationId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random CreationId
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for CreationId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for CreationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of artifact a creation holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum CreationKind {
    #[serde(rename = "article")]
    Article,
    #[serde(rename = "blog-title")]
    BlogTitle,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "resume-review")]
    ResumeReview,
}

impl CreationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::BlogTitle => "blog-title",
            Self::Image => "image",
            Self::ResumeReview => "resume-review",
        }
    }
}

impl FromStr for CreationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "article" => Ok(Self::Article),
            "blog-title" => Ok(Self::BlogTitle),
            "image" => Ok(Self::Image),
            "resume-review" => Ok(Self::ResumeReview),
            other => Err(format!("Unknown creation kind: {}", other)),
        }
    }
}

impl fmt::Display for CreationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of flipping like membership on a creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    Liked,
    Unliked,
}

impl LikeOutcome {
    /// User-facing outcome label returned on the wire
    pub fn message(&self) -> &'static str {
        match self {
            Self::Liked => "Creation Liked",
            Self::Unliked => "Creation Unliked",
        }
    }
}
