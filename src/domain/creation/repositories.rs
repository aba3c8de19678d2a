//! Creation repository interface

use async_trait::async_trait;

use crate::domain::creation::entities::{Creation, NewCreation};
use crate::domain::creation::errors::CreationError;
use crate::domain::creation::value_objects::{CreationId, LikeOutcome};
use crate::domain::identity::UserId;

/// Durable storage for creations.
#[async_trait]
pub trait ICreationRepository: Send + Sync {
    /// Persist a new creation; the store assigns id and created_at.
    async fn insert(&self, new: NewCreation) -> Result<Creation, CreationError>;

    /// All creations owned by `user`, newest first.
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Creation>, CreationError>;

    /// All published creations, newest first.
    async fn list_published(&self) -> Result<Vec<Creation>, CreationError>;

    /// Atomically flip `user`'s membership in the creation's likers set.
    ///
    /// Returns `Ok(None)` when no creation with `id` exists; no write happens
    /// in that case.
    async fn toggle_like(
        &self,
        id: CreationId,
        user: &UserId,
    ) -> Result<Option<LikeOutcome>, CreationError>;
}
