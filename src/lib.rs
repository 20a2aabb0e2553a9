//! # Caseflow Core
//!
//! Rust core for use-case workflow versioning and execution dispatch.
//!
//! ## Overview
//!
//! A use case owns an ordered stage sequence. Editing the stages means:
//! compile the sequence into a workflow definition, publish it as a new
//! immutable version of the use case's long-lived state machine, derive a
//! collision-resistant execution name from the previous one, start an
//! execution under the new version carrying task and attribution metadata,
//! and durably record the new execution handle. The engine and the store
//! are updated non-atomically; the crate's error taxonomy keeps the two
//! reconcilable after partial failure instead of pretending atomicity.
//!
//! ## Module Organization
//!
//! - [`orchestration`] - the update coordinator driving the full sequence
//! - [`engine`] - execution engine boundary (publish / start-execution)
//! - [`store`] - persisted store boundary and Postgres implementation
//! - [`identity`] - actor identity resolution
//! - [`models`] - use case, task projection, workflow and stage types
//! - [`definition`] - pure stage-sequence-to-definition compiler
//! - [`naming`] - execution name derivation
//! - [`validation`] - boundary validation of caller input
//! - [`error`] - structured error taxonomy, including reconciliation gaps
//! - [`config`] - environment-driven configuration
//! - [`logging`] - structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use caseflow_core::config::CaseflowConfig;
//! use caseflow_core::identity::PgIdentityResolver;
//! use caseflow_core::models::StageInput;
//! use caseflow_core::orchestration::{UpdateCoordinator, UpdateRequest};
//! use caseflow_core::store::PgUseCaseStore;
//!
//! # async fn example(
//! #     pool: sqlx::PgPool,
//! #     engine: Arc<dyn caseflow_core::engine::ExecutionEngine>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let config = CaseflowConfig::from_env()?;
//! let coordinator = UpdateCoordinator::with_config(
//!     Arc::new(PgIdentityResolver::new(pool.clone())),
//!     Arc::new(PgUseCaseStore::new(pool)),
//!     engine,
//!     config,
//! );
//!
//! let outcome = coordinator
//!     .update(UpdateRequest {
//!         use_case_id: uuid::Uuid::new_v4(),
//!         updated_by_id: uuid::Uuid::new_v4(),
//!         name: "checkout".to_string(),
//!         stages: vec![StageInput::new("intake").with_task("collect documents")],
//!     })
//!     .await?;
//!
//! println!("execution {} started", outcome.execution_name);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod definition;
pub mod engine;
pub mod error;
pub mod identity;
pub mod logging;
pub mod models;
pub mod naming;
pub mod orchestration;
pub mod store;
pub mod validation;

pub use config::CaseflowConfig;
pub use definition::{compile_definition, StageState, WorkflowDefinition};
pub use engine::{
    EngineError, ExecutionEngine, ExecutionInput, PublishRequest, PublishedVersion,
    StartExecutionRequest, StartedExecution,
};
pub use error::{Result, UpdateError};
pub use identity::{IdentityResolver, PgIdentityResolver};
pub use models::{Attribution, StageInput, TaskRow, UseCaseMeta, UseCaseRecord};
pub use naming::next_execution_name;
pub use orchestration::{UpdateCoordinator, UpdateOutcome, UpdateRequest};
pub use store::{PgUseCaseStore, UseCaseSnapshot, UseCaseStore};
