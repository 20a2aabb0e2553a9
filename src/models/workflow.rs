//! # Workflow Row
//!
//! A workflow row pins the engine's stable state-machine handle. The handle
//! never changes across updates - only its published version does.

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Workflow identity plus the engine handle it maps to.
#[derive(Debug, Clone, FromRow)]
pub struct WorkflowRow {
    pub workflow_id: Uuid,
    pub state_machine_arn: String,
}

impl WorkflowRow {
    /// Resolve the stable engine handle for a workflow.
    pub async fn find_arn(pool: &PgPool, workflow_id: Uuid) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT state_machine_arn
            FROM caseflow_workflows
            WHERE workflow_id = $1
            "#,
        )
        .bind(workflow_id)
        .fetch_optional(pool)
        .await
    }
}
