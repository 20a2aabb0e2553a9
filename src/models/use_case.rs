//! # Use Case Model
//!
//! The top-level record being updated: a use case owns a stage-driven
//! workflow, a JSONB metadata blob (name, attribution, whatever else the
//! service has accreted there), and a pointer to its current execution.
//!
//! The record carries a `revision` counter used as an optimistic guard on
//! the final write: two concurrent updates can both publish and dispatch,
//! but only the first commit lands - the second fails the revision check
//! instead of silently overwriting (the previous last-write-wins behavior
//! left the loser's execution untracked).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{Result, UpdateError};

/// Attribution of the most recent successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Typed view of the use case JSONB blob.
///
/// Only the fields this crate touches are modeled; everything else in the
/// blob is preserved across the read-modify-write cycle via `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCaseMeta {
    /// Current use case name, which doubles as the previous execution name
    /// the namer derives from.
    pub name: String,
    /// Who performed the most recent successful update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Attribution>,
    /// Unmodeled blob fields, carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UseCaseMeta {
    /// Apply the outcome of a successful dispatch: the derived execution
    /// name and the attribution of the caller who drove it.
    pub fn apply_update(&mut self, new_name: String, updated_by: Attribution) {
        self.name = new_name;
        self.updated_by = Some(updated_by);
    }
}

/// One use case row from the persisted store.
#[derive(Debug, Clone, FromRow)]
pub struct UseCaseRecord {
    pub use_case_id: Uuid,
    /// Reference to the owning workflow; a use case without one cannot be
    /// dispatched.
    pub workflow_id: Option<Uuid>,
    /// Raw JSONB metadata blob; parse with [`UseCaseRecord::parse_meta`].
    pub use_case: serde_json::Value,
    /// Handle of the currently tracked execution, superseded on each
    /// successful update.
    pub execution_arn: Option<String>,
    /// Optimistic-concurrency guard, incremented by every committed write.
    pub revision: i64,
    pub updated_at: NaiveDateTime,
}

impl UseCaseRecord {
    /// Load one use case by id.
    pub async fn find(pool: &PgPool, use_case_id: Uuid) -> Result<Option<Self>> {
        let record = sqlx::query_as::<_, Self>(
            r#"
            SELECT
                use_case_id,
                workflow_id,
                use_case,
                execution_arn,
                revision,
                updated_at
            FROM caseflow_use_cases
            WHERE use_case_id = $1
            "#,
        )
        .bind(use_case_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Parse the JSONB blob into its typed view.
    pub fn parse_meta(&self) -> Result<UseCaseMeta> {
        let meta = serde_json::from_value(self.use_case.clone())?;
        Ok(meta)
    }

    /// Record a dispatched execution: new metadata blob and execution
    /// handle in one write, guarded by the revision read at load time.
    ///
    /// Zero rows affected means a concurrent update committed first (or
    /// the row vanished); the caller maps that to its conflict handling.
    pub async fn update_after_dispatch(
        pool: &PgPool,
        use_case_id: Uuid,
        expected_revision: i64,
        meta: &UseCaseMeta,
        execution_arn: &str,
    ) -> Result<()> {
        let blob = serde_json::to_value(meta)?;

        let result = sqlx::query(
            r#"
            UPDATE caseflow_use_cases
            SET execution_arn = $1,
                use_case = $2,
                revision = revision + 1,
                updated_at = NOW()
            WHERE use_case_id = $3
              AND revision = $4
            "#,
        )
        .bind(execution_arn)
        .bind(blob)
        .bind(use_case_id)
        .bind(expected_revision)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(UpdateError::Conflict(format!(
                "use case {use_case_id} changed since revision {expected_revision}"
            )));
        }

        Ok(())
    }
}
