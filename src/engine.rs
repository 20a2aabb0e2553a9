//! # Execution Engine Seam
//!
//! Trait boundary to the external workflow engine. The engine owns two
//! durable operations the coordinator cannot roll back: publishing a new
//! immutable version of a state machine, and starting a named execution
//! under a specific version. Implementations adapt a concrete engine
//! (an AWS Step Functions-style service, an embedded engine, a test mock);
//! the coordinator only sees this trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::definition::WorkflowDefinition;
use crate::models::TaskRow;

/// Errors an engine implementation may surface.
///
/// Name collisions get their own variant because the coordinator must
/// treat them as terminal: retrying with a mutated name would break the
/// naming scheme's shared-prefix discoverability.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// An execution with this name already exists in the engine scope.
    #[error("execution name already in use: {0}")]
    NameConflict(String),

    /// The engine was unreachable, timed out, or failed transiently.
    #[error("engine unavailable: {0}")]
    Unavailable(String),
}

/// Request to publish a compiled definition as a new version of an
/// existing state machine.
#[derive(Debug, Clone, Serialize)]
pub struct PublishRequest {
    /// Stable handle of the state machine being updated.
    pub state_machine_arn: String,
    /// Compiled definition to publish.
    pub definition: WorkflowDefinition,
    /// Role the engine assumes when running this version.
    pub role_arn: String,
    /// Human-readable description stored with the version.
    pub version_description: String,
}

/// A freshly published, immutable version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedVersion {
    /// Version-specific handle, usable to start executions under exactly
    /// this version.
    pub version_arn: String,
}

/// Request to start a named execution under a published version.
#[derive(Debug, Clone, Serialize)]
pub struct StartExecutionRequest {
    /// Version-specific handle from a prior publish.
    pub version_arn: String,
    /// Execution name, unique within the engine scope.
    pub name: String,
    /// Input payload handed to the execution.
    pub input: ExecutionInput,
}

/// A started execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartedExecution {
    /// Opaque handle of the running execution.
    pub execution_arn: String,
}

/// Input payload synthesized for an update-triggered execution.
///
/// `project_id` mirrors `usecase_id` and `task_array` keeps its wire key
/// so downstream consumers of the execution input see the same shape the
/// service has always produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionInput {
    pub flag: String,
    pub usecase_id: Uuid,
    pub project_id: Uuid,
    #[serde(rename = "taskArray")]
    pub task_array: Vec<TaskRow>,
}

impl ExecutionInput {
    /// Payload for an update dispatch: flag pinned to `"Update"`,
    /// project id mirroring the use case id.
    pub fn for_update(usecase_id: Uuid, task_array: Vec<TaskRow>) -> Self {
        Self {
            flag: "Update".to_string(),
            usecase_id,
            project_id: usecase_id,
            task_array,
        }
    }
}

/// External workflow engine boundary.
///
/// Both operations have durable side effects on success. Implementations
/// must not retry internally in ways that could double-publish or
/// double-start; the coordinator owns the retry policy.
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    /// Publish `definition` as a new immutable version of the state
    /// machine, returning the version-specific handle.
    async fn publish_version(
        &self,
        request: PublishRequest,
    ) -> Result<PublishedVersion, EngineError>;

    /// Start a named execution under a specific published version.
    async fn start_execution(
        &self,
        request: StartExecutionRequest,
    ) -> Result<StartedExecution, EngineError>;

    /// Implementation name for logs and error context.
    fn engine_name(&self) -> &'static str;
}
