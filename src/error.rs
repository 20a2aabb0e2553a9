//! # Error Taxonomy
//!
//! Structured error handling for the update-and-dispatch pipeline.
//!
//! The taxonomy distinguishes caller mistakes (`Validation`, `NotFound`),
//! races (`Conflict`), transient infrastructure trouble
//! (`ExternalUnavailable`), and the one state that must never be flattened
//! into a generic failure: `ReconciliationGap`, raised when the execution
//! engine was mutated but the store write that records it did not land.

use uuid::Uuid;

/// Errors surfaced by the update-and-dispatch pipeline.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// Caller input rejected at the boundary before any side effect.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced entity (use case, workflow, actor) does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The use case exists but is not in a dispatchable state
    /// (e.g. it has no associated workflow).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Execution name collision on the engine, or a concurrent update won
    /// the race before this invocation reached its final write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The engine or store was unreachable (or timed out) for a call that
    /// left no side effect behind.
    #[error("{system} unavailable: {reason}")]
    ExternalUnavailable { system: &'static str, reason: String },

    /// Publish and/or start-execution succeeded but the final store write
    /// failed. The engine now holds artifacts the store does not know
    /// about; every orphaned handle is carried here so an operator or a
    /// reconciliation sweep can re-point the stored execution reference.
    #[error(
        "Reconciliation gap for use case {use_case_id}: version {version_arn}, \
         execution {execution_arn} ({execution_name}) are live but unrecorded: {reason}"
    )]
    ReconciliationGap {
        use_case_id: Uuid,
        workflow_id: Uuid,
        version_arn: String,
        execution_arn: String,
        execution_name: String,
        reason: String,
    },

    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Database error outside the taxonomy above.
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Metadata blob could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl UpdateError {
    /// Whether this failure left an orphaned artifact on the engine.
    pub fn is_reconciliation_gap(&self) -> bool {
        matches!(self, Self::ReconciliationGap { .. })
    }

    /// Whether the caller can safely retry the whole operation verbatim.
    ///
    /// Conflicts are excluded: retrying a name collision unchanged would
    /// collide again, and retrying after a lost revision race needs a fresh
    /// read first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ExternalUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, UpdateError>;
