//! Orchestration domain module.
//!
//! This module defines the pre-provisioning state machine types.

mod action;
mod event;
mod state;
pub mod state_machine;

pub use action::ProvisioningAction;
pub use event::ProvisioningEvent;
pub use state::{AttemptOutcome, OrchestrationState, ProvisioningResult};
pub use state_machine::ProvisioningStateMachine;
