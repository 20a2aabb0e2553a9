//! # Identity Resolver
//!
//! Maps an actor id to the display identity stamped into use case
//! attribution. Resolution happens before any side effect: a dispatch with
//! partial attribution is worse than no dispatch at all, so failure here
//! aborts the whole update.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, UpdateError};
use crate::models::Attribution;

/// Boundary to the identity system.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve an actor id to its display identity. Unknown actors are a
    /// `NotFound`, surfaced to the caller verbatim.
    async fn resolve(&self, actor_id: Uuid) -> Result<Attribution>;
}

/// Postgres-backed resolver over the resource directory.
///
/// Display name and image live inside the resource JSONB document, so both
/// are projected out rather than read as columns.
#[derive(Debug, Clone)]
pub struct PgIdentityResolver {
    pool: PgPool,
}

impl PgIdentityResolver {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityResolver for PgIdentityResolver {
    async fn resolve(&self, actor_id: Uuid) -> Result<Attribution> {
        let row = sqlx::query_as::<_, (Option<String>, Option<String>)>(
            r#"
            SELECT
                (r.resource->>'name') AS name,
                (r.resource->>'image') AS image_url
            FROM caseflow_resources AS r
            WHERE r.resource_id = $1
            "#,
        )
        .bind(actor_id)
        .fetch_optional(&self.pool)
        .await?;

        let (name, image_url) = row.ok_or(UpdateError::NotFound {
            entity: "actor",
            id: actor_id.to_string(),
        })?;

        // A directory row without a display name cannot attribute an
        // update; refuse rather than stamp partial attribution.
        let name = name.ok_or_else(|| {
            UpdateError::InvalidState(format!("actor {actor_id} has no display name"))
        })?;

        Ok(Attribution {
            id: actor_id,
            name,
            image_url,
        })
    }
}
