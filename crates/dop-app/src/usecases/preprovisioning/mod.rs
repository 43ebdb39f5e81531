//! Pre-provisioning use cases.
//!
//! This module exposes the pre-provisioning orchestrator.

mod context;
pub mod orchestrator;

pub use orchestrator::{OrchestratorError, PreProvisioningOrchestrator, PreProvisioningPorts};
