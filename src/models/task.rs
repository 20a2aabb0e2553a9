//! # Task Projection
//!
//! Row-level projection of a use case's tasks, joined from the task table.
//! Read-only from the coordinator's perspective: task status is mutated
//! asynchronously by the dispatched execution, never by this crate.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// One task row as carried into the execution input payload.
///
/// `task_name` and `status` are projected out of the task JSONB document,
/// so either may be absent on malformed rows; the payload forwards them
/// as-is rather than inventing defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TaskRow {
    pub task_id: Uuid,
    pub task_name: Option<String>,
    pub status: Option<String>,
}

impl TaskRow {
    /// Fetch the task projection for a use case.
    ///
    /// Order is whatever the join produces - callers depend on the rows
    /// arriving in join order, so no sorting is applied here. A use case
    /// with zero tasks yields an empty vector, not an error.
    pub async fn for_use_case(pool: &PgPool, use_case_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT
                t.task_id,
                (t.task->>'name') AS task_name,
                (t.task->>'status') AS status
            FROM caseflow_tasks AS t
            WHERE t.use_case_id = $1
            "#,
        )
        .bind(use_case_id)
        .fetch_all(pool)
        .await
    }
}
