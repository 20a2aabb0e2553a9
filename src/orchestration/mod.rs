//! # Orchestration
//!
//! The update-and-dispatch coordinator and its request/outcome types.

pub mod coordinator;

pub use coordinator::{UpdateCoordinator, UpdateOutcome, UpdateRequest};
