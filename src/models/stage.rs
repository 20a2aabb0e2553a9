//! Caller-supplied stage shape.

use serde::{Deserialize, Serialize};

/// One ordered unit of work within a use case.
///
/// A use case's workflow definition is a pure function of its stage
/// sequence: editing the stages is what triggers republish-and-dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageInput {
    /// Stage label, unique within the sequence and used as the state name
    /// in the compiled definition.
    pub label: String,
    /// Task names carried by this stage.
    pub tasks: Vec<String>,
    /// Checklist items carried by this stage.
    pub checklist: Vec<String>,
}

impl StageInput {
    /// Convenience constructor used by tests and examples.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tasks: Vec::new(),
            checklist: Vec::new(),
        }
    }

    /// Add a task name.
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.tasks.push(task.into());
        self
    }

    /// Add a checklist item.
    pub fn with_checklist_item(mut self, item: impl Into<String>) -> Self {
        self.checklist.push(item.into());
        self
    }
}
