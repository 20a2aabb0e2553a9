//! # Update Coordinator
//!
//! Drives the full update-and-dispatch sequence for one use case: resolve
//! attribution, load state, compile and publish a new workflow version,
//! derive the next execution name, start the execution, and record the
//! result in the store.
//!
//! ## Side-effect ordering
//!
//! The engine (publish, start) and the store (final write) are mutated
//! non-atomically, in that order. Everything before publish is free to
//! fail with no external side effect. Publish and start each leave a
//! durable artifact behind on failure of a later step; the coordinator
//! never attempts compensation. The final write is the only durable record
//! that the dispatch happened - when it fails, the error is a
//! [`UpdateError::ReconciliationGap`] carrying every orphaned handle, and
//! it is logged before being returned.
//!
//! ## Timeouts
//!
//! Every external call is bounded. Read-only calls (identity, snapshot,
//! handle lookup) retry on timeout up to the configured limit; publish,
//! start and the final write are never retried, since a duplicate attempt
//! could double a side effect.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::CaseflowConfig;
use crate::definition::compile_definition;
use crate::engine::{
    EngineError, ExecutionEngine, ExecutionInput, PublishRequest, StartExecutionRequest,
};
use crate::error::{Result, UpdateError};
use crate::identity::IdentityResolver;
use crate::logging::log_reconciliation_gap;
use crate::models::StageInput;
use crate::naming::next_execution_name;
use crate::store::UseCaseStore;
use crate::validation::validate_update_request;

/// One use case update, as received from the boundary.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub use_case_id: Uuid,
    pub updated_by_id: Uuid,
    /// Caller-supplied name, fed to the namer against the stored one.
    pub name: String,
    /// Edited stage sequence; becomes the new workflow version.
    pub stages: Vec<StageInput>,
}

/// Confirmation of a fully applied update.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    /// The accepted stage list, echoed back to the caller.
    pub stages: Vec<StageInput>,
    /// Name the new execution runs under.
    pub execution_name: String,
    /// Handle of the started execution, as persisted.
    pub execution_arn: String,
    /// Version-specific handle the execution was started under.
    pub version_arn: String,
}

/// Coordinates update-and-dispatch across the identity resolver, the
/// persisted store, and the execution engine.
pub struct UpdateCoordinator {
    identity: Arc<dyn IdentityResolver>,
    store: Arc<dyn UseCaseStore>,
    engine: Arc<dyn ExecutionEngine>,
    config: CaseflowConfig,
}

impl UpdateCoordinator {
    /// Create a coordinator with default configuration.
    pub fn new(
        identity: Arc<dyn IdentityResolver>,
        store: Arc<dyn UseCaseStore>,
        engine: Arc<dyn ExecutionEngine>,
    ) -> Self {
        Self {
            identity,
            store,
            engine,
            config: CaseflowConfig::default(),
        }
    }

    /// Create a coordinator with custom configuration.
    pub fn with_config(
        identity: Arc<dyn IdentityResolver>,
        store: Arc<dyn UseCaseStore>,
        engine: Arc<dyn ExecutionEngine>,
        config: CaseflowConfig,
    ) -> Self {
        Self {
            identity,
            store,
            engine,
            config,
        }
    }

    /// Apply an edited stage sequence to a use case and dispatch an
    /// execution under the resulting workflow version.
    #[instrument(
        skip(self, request),
        fields(use_case_id = %request.use_case_id, requested_name = %request.name)
    )]
    pub async fn update(&self, request: UpdateRequest) -> Result<UpdateOutcome> {
        validate_update_request(&request.name, &request.stages)?;

        // Attribution first: a dispatch that cannot name who drove it is
        // not acceptable, so an unknown actor aborts before any side
        // effect.
        let actor = self
            .read_with_retry("identity resolver", self.config.identity_timeout_ms, || {
                self.identity.resolve(request.updated_by_id)
            })
            .await?;

        let snapshot = self
            .read_with_retry("store", self.config.store_read_timeout_ms, || {
                self.store.load_for_update(request.use_case_id)
            })
            .await?;

        let workflow_id = snapshot.record.workflow_id.ok_or_else(|| {
            UpdateError::InvalidState(format!(
                "use case {} has no associated workflow",
                request.use_case_id
            ))
        })?;
        let expected_revision = snapshot.record.revision;
        let mut meta = snapshot.record.parse_meta()?;

        debug!(
            workflow_id = %workflow_id,
            revision = expected_revision,
            task_count = snapshot.tasks.len(),
            stored_name = %meta.name,
            "Loaded use case snapshot"
        );

        let state_machine_arn = self
            .read_with_retry("store", self.config.store_read_timeout_ms, || {
                self.store.workflow_arn(workflow_id)
            })
            .await?;

        let definition = compile_definition(&request.stages);

        // Durable side effect: once this returns, a new immutable version
        // exists on the engine regardless of what happens below.
        let published = self
            .bounded_engine_call(
                "publish_version",
                self.engine.publish_version(PublishRequest {
                    state_machine_arn,
                    definition,
                    role_arn: self.config.engine_role_arn.clone(),
                    version_description: self.config.version_description.clone(),
                }),
            )
            .await?;

        info!(
            engine = self.engine.engine_name(),
            version_arn = %published.version_arn,
            "Published new workflow version"
        );

        let execution_name = next_execution_name(&meta.name, &request.name);

        // A name collision here is terminal: renaming and retrying would
        // break the shared-prefix naming scheme.
        let started = self
            .bounded_engine_call(
                "start_execution",
                self.engine.start_execution(StartExecutionRequest {
                    version_arn: published.version_arn.clone(),
                    name: execution_name.clone(),
                    input: ExecutionInput::for_update(request.use_case_id, snapshot.tasks),
                }),
            )
            .await?;

        info!(
            execution_name = %execution_name,
            execution_arn = %started.execution_arn,
            "Started execution under new version"
        );

        meta.apply_update(execution_name.clone(), actor);

        // The one durable record of everything above. Any failure here -
        // including losing the revision race - leaves live engine
        // artifacts the store does not know about, so it is reported as a
        // reconciliation gap with every handle an operator needs.
        let commit = timeout(
            Duration::from_millis(self.config.store_write_timeout_ms),
            self.store.commit_dispatch(
                request.use_case_id,
                expected_revision,
                &meta,
                &started.execution_arn,
            ),
        )
        .await
        .unwrap_or_else(|_| {
            Err(UpdateError::ExternalUnavailable {
                system: "store",
                reason: format!(
                    "commit timed out after {}ms",
                    self.config.store_write_timeout_ms
                ),
            })
        });

        if let Err(source) = commit {
            log_reconciliation_gap(
                request.use_case_id,
                workflow_id,
                &published.version_arn,
                &started.execution_arn,
                &execution_name,
                &source.to_string(),
            );
            return Err(UpdateError::ReconciliationGap {
                use_case_id: request.use_case_id,
                workflow_id,
                version_arn: published.version_arn,
                execution_arn: started.execution_arn,
                execution_name,
                reason: source.to_string(),
            });
        }

        info!(
            execution_name = %execution_name,
            revision = expected_revision + 1,
            "Use case update committed"
        );

        Ok(UpdateOutcome {
            stages: request.stages,
            execution_name,
            execution_arn: started.execution_arn,
            version_arn: published.version_arn,
        })
    }

    /// Run a read-only call under its timeout, retrying timeouts up to the
    /// configured limit. Errors from the call itself are returned
    /// immediately - only timeouts are retryable for reads.
    async fn read_with_retry<T, F, Fut>(
        &self,
        system: &'static str,
        timeout_ms: u64,
        mut op: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match timeout(Duration::from_millis(timeout_ms), op()).await {
                Ok(result) => return result,
                Err(_) => {
                    attempt += 1;
                    if attempt > self.config.read_retry_limit {
                        return Err(UpdateError::ExternalUnavailable {
                            system,
                            reason: format!("timed out after {timeout_ms}ms ({attempt} attempts)"),
                        });
                    }
                    warn!(system, attempt, timeout_ms, "Read timed out, retrying");
                }
            }
        }
    }

    /// Run an engine call under its timeout. Never retried: publish and
    /// start both have durable side effects, and a duplicate attempt could
    /// double them.
    async fn bounded_engine_call<T, Fut>(&self, operation: &'static str, fut: Fut) -> Result<T>
    where
        Fut: Future<Output = std::result::Result<T, EngineError>>,
    {
        match timeout(Duration::from_millis(self.config.engine_timeout_ms), fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(map_engine_error(err)),
            Err(_) => Err(UpdateError::ExternalUnavailable {
                system: "engine",
                reason: format!(
                    "{operation} timed out after {}ms",
                    self.config.engine_timeout_ms
                ),
            }),
        }
    }
}

/// Map engine-boundary errors into the update taxonomy.
fn map_engine_error(err: EngineError) -> UpdateError {
    match err {
        EngineError::NameConflict(name) => {
            UpdateError::Conflict(format!("execution name '{name}' already in use"))
        }
        EngineError::Unavailable(reason) => UpdateError::ExternalUnavailable {
            system: "engine",
            reason,
        },
    }
}
