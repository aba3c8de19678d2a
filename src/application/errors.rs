//! Application error types
//!
//! Everything a handler can fail with collapses into this one enum; the
//! presentation layer turns it into the `{success: false, message}` envelope,
//! so the Display strings here are the wire messages.

use crate::domain::creation::CreationError;
use crate::domain::entitlement::EntitlementError;
use crate::infrastructure::llm::LlmError;
use crate::infrastructure::media::MediaError;
use crate::infrastructure::resume::ResumeParseError;

/// Application-level error aggregate
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    /// Free-tier counter has reached the metered-operation cap
    #[error("Limit reached. Upgrade to continue")]
    QuotaExceeded,

    /// Operation is gated entirely on plan status
    #[error("Premium feature only")]
    PremiumRequired,

    /// Resume upload exceeds the size bound; checked before any provider call
    #[error("Resume exceeds 5MB")]
    ResumeTooLarge,

    #[error("Creation not found")]
    CreationNotFound,

    /// Malformed or missing request input
    #[error("{0}")]
    Validation(String),

    #[error("Failed to read resume: {0}")]
    ResumeParse(#[from] ResumeParseError),

    #[error(transparent)]
    Entitlement(#[from] EntitlementError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Repository(#[from] CreationError),
}

impl ApplicationError {
    /// Expected user-facing rejections, logged at warn; everything else is an
    /// upstream fault logged at error.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::QuotaExceeded
                | Self::PremiumRequired
                | Self::ResumeTooLarge
                | Self::CreationNotFound
                | Self::Validation(_)
        )
    }
}
