//! Mock collaborators for exercising the update coordinator without a
//! database or a live engine.
//!
//! Each mock records its calls into a shared journal (invocation order
//! across all collaborators) and into its own state for assertions, and
//! can be configured to fail or stall in the ways the coordinator must
//! handle.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use caseflow_core::engine::{
    EngineError, ExecutionEngine, PublishRequest, PublishedVersion, StartExecutionRequest,
    StartedExecution,
};
use caseflow_core::error::{Result, UpdateError};
use caseflow_core::identity::IdentityResolver;
use caseflow_core::models::{Attribution, TaskRow, UseCaseMeta, UseCaseRecord};
use caseflow_core::store::{UseCaseSnapshot, UseCaseStore};

/// Shared journal of collaborator calls, in invocation order.
pub type CallJournal = Arc<Mutex<Vec<&'static str>>>;

pub fn new_journal() -> CallJournal {
    Arc::new(Mutex::new(Vec::new()))
}

/// Build a use case record seeded the way the store would return it.
pub fn seeded_record(
    use_case_id: Uuid,
    workflow_id: Option<Uuid>,
    name: &str,
    revision: i64,
) -> UseCaseRecord {
    UseCaseRecord {
        use_case_id,
        workflow_id,
        use_case: json!({
            "name": name,
            "description": "seeded by tests",
        }),
        execution_arn: Some("arn:caseflow:execution:previous".to_string()),
        revision,
        updated_at: chrono::Utc::now().naive_utc(),
    }
}

pub fn sample_attribution(actor_id: Uuid) -> Attribution {
    Attribution {
        id: actor_id,
        name: "Dana Perez".to_string(),
        image_url: Some("https://img.example/dana.png".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

pub struct MockIdentity {
    attribution: Option<Attribution>,
    slow_attempts: Mutex<u32>,
    pub calls: Arc<Mutex<u32>>,
    journal: CallJournal,
}

impl MockIdentity {
    /// Resolver that always returns `attribution`.
    pub fn returning(attribution: Attribution, journal: CallJournal) -> Self {
        Self {
            attribution: Some(attribution),
            slow_attempts: Mutex::new(0),
            calls: Arc::new(Mutex::new(0)),
            journal,
        }
    }

    /// Resolver that knows no actors.
    pub fn unknown_actor(journal: CallJournal) -> Self {
        Self {
            attribution: None,
            slow_attempts: Mutex::new(0),
            calls: Arc::new(Mutex::new(0)),
            journal,
        }
    }

    /// Stall the first `attempts` calls past any reasonable timeout.
    pub fn with_slow_attempts(self, attempts: u32) -> Self {
        *self.slow_attempts.lock().unwrap() = attempts;
        self
    }
}

#[async_trait]
impl IdentityResolver for MockIdentity {
    async fn resolve(&self, actor_id: Uuid) -> Result<Attribution> {
        self.journal.lock().unwrap().push("resolve");
        *self.calls.lock().unwrap() += 1;

        let stall = {
            let mut remaining = self.slow_attempts.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                true
            } else {
                false
            }
        };
        if stall {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }

        self.attribution.clone().ok_or(UpdateError::NotFound {
            entity: "actor",
            id: actor_id.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// How the mock store's commit should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitFailure {
    /// A concurrent update won the revision race.
    RevisionConflict,
    /// The store was unreachable for the write.
    Unavailable,
}

/// One committed write, as the store received it.
#[derive(Debug, Clone)]
pub struct CommitRecord {
    pub use_case_id: Uuid,
    pub expected_revision: i64,
    pub meta: UseCaseMeta,
    pub execution_arn: String,
}

#[derive(Debug, Default)]
pub struct MockStoreState {
    pub commits: Vec<CommitRecord>,
    pub commit_attempts: u32,
}

pub struct MockStore {
    record: UseCaseRecord,
    tasks: Vec<TaskRow>,
    state_machine_arn: String,
    commit_failure: Option<CommitFailure>,
    pub state: Arc<Mutex<MockStoreState>>,
    journal: CallJournal,
}

impl MockStore {
    pub fn new(record: UseCaseRecord, tasks: Vec<TaskRow>, journal: CallJournal) -> Self {
        Self {
            record,
            tasks,
            state_machine_arn: "arn:caseflow:state-machine:stable".to_string(),
            commit_failure: None,
            state: Arc::new(Mutex::new(MockStoreState::default())),
            journal,
        }
    }

    pub fn with_commit_failure(mut self, failure: CommitFailure) -> Self {
        self.commit_failure = Some(failure);
        self
    }

    pub fn state_machine_arn(&self) -> &str {
        &self.state_machine_arn
    }
}

#[async_trait]
impl UseCaseStore for MockStore {
    async fn load_for_update(&self, _use_case_id: Uuid) -> Result<UseCaseSnapshot> {
        self.journal.lock().unwrap().push("load");
        Ok(UseCaseSnapshot {
            record: self.record.clone(),
            tasks: self.tasks.clone(),
        })
    }

    async fn workflow_arn(&self, _workflow_id: Uuid) -> Result<String> {
        self.journal.lock().unwrap().push("workflow_arn");
        Ok(self.state_machine_arn.clone())
    }

    async fn commit_dispatch(
        &self,
        use_case_id: Uuid,
        expected_revision: i64,
        meta: &UseCaseMeta,
        execution_arn: &str,
    ) -> Result<()> {
        self.journal.lock().unwrap().push("commit");
        let mut state = self.state.lock().unwrap();
        state.commit_attempts += 1;

        match self.commit_failure {
            Some(CommitFailure::RevisionConflict) => Err(UpdateError::Conflict(format!(
                "use case {use_case_id} changed since revision {expected_revision}"
            ))),
            Some(CommitFailure::Unavailable) => Err(UpdateError::ExternalUnavailable {
                system: "store",
                reason: "connection reset during commit".to_string(),
            }),
            None => {
                state.commits.push(CommitRecord {
                    use_case_id,
                    expected_revision,
                    meta: meta.clone(),
                    execution_arn: execution_arn.to_string(),
                });
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MockEngineState {
    pub publishes: Vec<PublishRequest>,
    pub starts: Vec<StartExecutionRequest>,
}

pub struct MockEngine {
    version_arn: String,
    execution_arn: String,
    start_conflict: bool,
    slow_publish: bool,
    pub state: Arc<Mutex<MockEngineState>>,
    journal: CallJournal,
}

impl MockEngine {
    pub fn new(journal: CallJournal) -> Self {
        Self {
            version_arn: "arn:caseflow:state-machine:stable:7".to_string(),
            execution_arn: "arn:caseflow:execution:fresh".to_string(),
            start_conflict: false,
            slow_publish: false,
            state: Arc::new(Mutex::new(MockEngineState::default())),
            journal,
        }
    }

    /// Reject every start with a name collision.
    pub fn with_start_conflict(mut self) -> Self {
        self.start_conflict = true;
        self
    }

    /// Stall publishes past any reasonable timeout.
    pub fn with_slow_publish(mut self) -> Self {
        self.slow_publish = true;
        self
    }

    pub fn version_arn(&self) -> &str {
        &self.version_arn
    }

    pub fn execution_arn(&self) -> &str {
        &self.execution_arn
    }
}

#[async_trait]
impl ExecutionEngine for MockEngine {
    async fn publish_version(
        &self,
        request: PublishRequest,
    ) -> std::result::Result<PublishedVersion, EngineError> {
        self.journal.lock().unwrap().push("publish");
        self.state.lock().unwrap().publishes.push(request);

        if self.slow_publish {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }

        Ok(PublishedVersion {
            version_arn: self.version_arn.clone(),
        })
    }

    async fn start_execution(
        &self,
        request: StartExecutionRequest,
    ) -> std::result::Result<StartedExecution, EngineError> {
        self.journal.lock().unwrap().push("start");
        let name = request.name.clone();
        self.state.lock().unwrap().starts.push(request);

        if self.start_conflict {
            return Err(EngineError::NameConflict(name));
        }

        Ok(StartedExecution {
            execution_arn: self.execution_arn.clone(),
        })
    }

    fn engine_name(&self) -> &'static str {
        "mock-engine"
    }
}
