//! # Use Case Store
//!
//! Seam to the persisted store. Three operations cover everything the
//! coordinator needs: one read that aggregates the use case with its task
//! projection, one read resolving a workflow's stable engine handle, and
//! one revision-guarded write recording a dispatched execution.
//!
//! The Postgres implementation borrows connections from a pool per call,
//! so every exit path - success, error, timeout cancellation - releases
//! the connection.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, UpdateError};
use crate::models::{TaskRow, UseCaseMeta, UseCaseRecord, WorkflowRow};

/// A use case read together with its task projection, as one consistent
/// unit of work for the coordinator.
#[derive(Debug, Clone)]
pub struct UseCaseSnapshot {
    pub record: UseCaseRecord,
    /// Tasks in join order; empty when the use case has no tasks.
    pub tasks: Vec<TaskRow>,
}

/// Boundary to the persisted store.
#[async_trait]
pub trait UseCaseStore: Send + Sync {
    /// Load a use case and its ordered task projection.
    ///
    /// Unknown use case ids are a `NotFound`; a use case with zero tasks
    /// returns an empty task list, not an error.
    async fn load_for_update(&self, use_case_id: Uuid) -> Result<UseCaseSnapshot>;

    /// Resolve the stable engine handle for a workflow.
    async fn workflow_arn(&self, workflow_id: Uuid) -> Result<String>;

    /// Persist the outcome of a successful dispatch: metadata blob (new
    /// name + attribution) and execution handle in one write.
    ///
    /// Fails with `Conflict` when the record's revision no longer matches
    /// `expected_revision` - a concurrent update committed first.
    async fn commit_dispatch(
        &self,
        use_case_id: Uuid,
        expected_revision: i64,
        meta: &UseCaseMeta,
        execution_arn: &str,
    ) -> Result<()>;
}

/// Postgres-backed store implementation, delegating SQL to the model
/// accessors.
#[derive(Debug, Clone)]
pub struct PgUseCaseStore {
    pool: PgPool,
}

impl PgUseCaseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Access the underlying pool (shared with other Postgres-backed
    /// collaborators such as the identity resolver).
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UseCaseStore for PgUseCaseStore {
    async fn load_for_update(&self, use_case_id: Uuid) -> Result<UseCaseSnapshot> {
        let record = UseCaseRecord::find(&self.pool, use_case_id)
            .await?
            .ok_or(UpdateError::NotFound {
                entity: "use case",
                id: use_case_id.to_string(),
            })?;

        let tasks = TaskRow::for_use_case(&self.pool, use_case_id).await?;

        Ok(UseCaseSnapshot { record, tasks })
    }

    async fn workflow_arn(&self, workflow_id: Uuid) -> Result<String> {
        WorkflowRow::find_arn(&self.pool, workflow_id)
            .await?
            .ok_or(UpdateError::NotFound {
                entity: "workflow",
                id: workflow_id.to_string(),
            })
    }

    async fn commit_dispatch(
        &self,
        use_case_id: Uuid,
        expected_revision: i64,
        meta: &UseCaseMeta,
        execution_arn: &str,
    ) -> Result<()> {
        UseCaseRecord::update_after_dispatch(
            &self.pool,
            use_case_id,
            expected_revision,
            meta,
            execution_arn,
        )
        .await
    }
}
