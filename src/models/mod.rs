//! # Data Models
//!
//! Row-level models for the persisted store: the use case record and its
//! JSONB metadata blob, the task projection joined from the task table, the
//! workflow row holding the engine's stable handle, and the caller-supplied
//! stage shape.

pub mod stage;
pub mod task;
pub mod use_case;
pub mod workflow;

pub use stage::StageInput;
pub use task::TaskRow;
pub use use_case::{Attribution, UseCaseMeta, UseCaseRecord};
pub use workflow::WorkflowRow;
