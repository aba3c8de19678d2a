//! Creation entities

use chrono::{DateTime, Utc};

use crate::domain::creation::value_objects::{CreationId, CreationKind};
use crate::domain::identity::UserId;

/// A persisted record of one AI-generated artifact.
///
/// Immutable after insert except for `likers`, which is only touched by the
/// like-toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct Creation {
    pub id: CreationId,
    pub user_id: UserId,
    pub prompt: String,
    pub content: String,
    pub kind: CreationKind,
    pub publish: bool,
    pub likers: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a creation; `id`, `likers` and `created_at` are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewCreation {
    pub user_id: UserId,
    pub prompt: String,
    pub content: String,
    pub kind: CreationKind,
    pub publish: bool,
}

impl NewCreation {
    pub fn new(
        user_id: UserId,
        prompt: impl Into<String>,
        content: impl Into<String>,
        kind: CreationKind,
    ) -> Self {
        Self {
            user_id,
            prompt: prompt.into(),
            content: content.into(),
            kind,
            publish: false,
        }
    }

    pub fn published(mut self, publish: bool) -> Self {
        self.publish = publish;
        self
    }
}
