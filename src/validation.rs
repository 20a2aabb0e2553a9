//! Input validation for the update boundary
//!
//! Everything here runs before the coordinator touches any external
//! system, so a rejected request has zero side effects. Ids are typed
//! `uuid::Uuid` end to end; malformed ids never reach this layer.

use crate::error::{Result, UpdateError};
use crate::models::StageInput;

/// Minimum length of a use case name.
const MIN_NAME_LENGTH: usize = 3;

/// Validate the caller-supplied name and stage sequence.
pub fn validate_update_request(name: &str, stages: &[StageInput]) -> Result<()> {
    validate_use_case_name(name)?;
    validate_stages(stages)
}

/// Validates the caller-supplied use case name.
pub fn validate_use_case_name(name: &str) -> Result<()> {
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(UpdateError::Validation(format!(
            "use case name should be at least {MIN_NAME_LENGTH} characters long"
        )));
    }

    Ok(())
}

/// Validates the caller-supplied stage sequence.
pub fn validate_stages(stages: &[StageInput]) -> Result<()> {
    if stages.is_empty() {
        return Err(UpdateError::Validation(
            "at least one stage is required".to_string(),
        ));
    }

    for (index, stage) in stages.iter().enumerate() {
        if stage.label.trim().is_empty() {
            return Err(UpdateError::Validation(format!(
                "stage {index} has an empty label"
            )));
        }
    }

    Ok(())
}
