//! Device-owner pre-provisioning orchestration layer
//!
//! This crate drives the pre-provisioning state machine and its side effects
//! through the ports defined in `dop-core`.

pub mod usecases;

pub use usecases::preprovisioning::{
    OrchestratorError, PreProvisioningOrchestrator, PreProvisioningPorts,
};
