//! # Definition Compiler
//!
//! Pure compilation of an ordered stage sequence into the workflow
//! definition published to the engine. The coordinator never inspects the
//! graph shape - it serializes the result and hands it to the engine seam.
//!
//! The compiled form is a linear chain: one state per stage, each carrying
//! its task and checklist payload and pointing at the next stage, with the
//! last stage terminal.

use serde::{Deserialize, Serialize};

use crate::models::StageInput;

/// Compiled, immutable workflow definition.
///
/// Publishing this under a workflow handle creates a new version; the
/// definition itself is never mutated after publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    /// Name of the entry state; `None` only for an empty stage sequence.
    pub start_at: Option<String>,
    /// States in stage order.
    pub states: Vec<StageState>,
}

/// One state in the compiled definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageState {
    /// State name, taken from the stage label.
    pub name: String,
    pub tasks: Vec<String>,
    pub checklist: Vec<String>,
    /// Name of the following state; `None` marks the terminal state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Compile a stage sequence into a workflow definition.
///
/// Pure and side-effect free: equal stage sequences compile to equal
/// definitions, which is what makes published versions reproducible from
/// the stored stage data.
pub fn compile_definition(stages: &[StageInput]) -> WorkflowDefinition {
    let states = stages
        .iter()
        .enumerate()
        .map(|(index, stage)| StageState {
            name: stage.label.clone(),
            tasks: stage.tasks.clone(),
            checklist: stage.checklist.clone(),
            next: stages.get(index + 1).map(|next| next.label.clone()),
        })
        .collect::<Vec<_>>();

    WorkflowDefinition {
        start_at: stages.first().map(|stage| stage.label.clone()),
        states,
    }
}
