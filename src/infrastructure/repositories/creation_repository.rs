//! SQLx implementation of the Creation repository

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::creation::{
    Creation, CreationError, CreationId, CreationKind, ICreationRepository, LikeOutcome,
    NewCreation,
};
use crate::domain::identity::UserId;

/// SQLx implementation of the Creation repository
pub struct SqlxCreationRepository {
    pool: Arc<PgPool>,
}

impl SqlxCreationRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn map_row(row: PgRow) -> Result<Creation, CreationError> {
    let kind: String = row.get("kind");
    let kind = CreationKind::from_str(&kind).map_err(CreationError::database)?;

    Ok(Creation {
        id: CreationId::from(row.get::<uuid::Uuid, _>("id")),
        user_id: UserId::new(row.get::<String, _>("user_id")),
        prompt: row.get("prompt"),
        content: row.get("content"),
        kind,
        publish: row.get("publish"),
        likers: row.get("likers"),
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl ICreationRepository for SqlxCreationRepository {
    #[tracing::instrument(skip(self, new), fields(user_id = %new.user_id, kind = %new.kind))]
    async fn insert(&self, new: NewCreation) -> Result<Creation, CreationError> {
        let row = sqlx::query(
            r#"
            INSERT INTO creations (user_id, prompt, content, kind, publish)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, prompt, content, kind, publish, likers, created_at
            "#,
        )
        .bind(new.user_id.as_str())
        .bind(&new.prompt)
        .bind(&new.content)
        .bind(new.kind.as_str())
        .bind(new.publish)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Database error inserting creation: {}", e);
            CreationError::database(e.to_string())
        })?;

        map_row(row)
    }

    #[tracing::instrument(skip(self), fields(user_id = %user))]
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Creation>, CreationError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, prompt, content, kind, publish, likers, created_at
            FROM creations
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user.as_str())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Database error listing user creations: {}", e);
            CreationError::database(e.to_string())
        })?;

        rows.into_iter().map(map_row).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn list_published(&self) -> Result<Vec<Creation>, CreationError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, prompt, content, kind, publish, likers, created_at
            FROM creations
            WHERE publish = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Database error listing published creations: {}", e);
            CreationError::database(e.to_string())
        })?;

        rows.into_iter().map(map_row).collect()
    }

    #[tracing::instrument(skip(self), fields(creation_id = %id, user_id = %user))]
    async fn toggle_like(
        &self,
        id: CreationId,
        user: &UserId,
    ) -> Result<Option<LikeOutcome>, CreationError> {
        // One atomic statement; the row lock serializes concurrent togglers,
        // and RETURNING evaluates against the updated row.
        let row = sqlx::query(
            r#"
            UPDATE creations
            SET likers = CASE
                WHEN $2 = ANY(likers) THEN array_remove(likers, $2)
                ELSE array_append(likers, $2)
            END
            WHERE id = $1
            RETURNING $2 = ANY(likers) AS liked
            "#,
        )
        .bind(id.as_uuid())
        .bind(user.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Database error toggling like: {}", e);
            CreationError::database(e.to_string())
        })?;

        Ok(row.map(|row| {
            if row.get::<bool, _>("liked") {
                LikeOutcome::Liked
            } else {
                LikeOutcome::Unliked
            }
        }))
    }
}
