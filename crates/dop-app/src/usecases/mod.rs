//! Business logic use cases
//!
//! One attempt is one use case: it suspends whenever the user or an external
//! actor has to decide something, and resumes through the orchestrator.

pub mod preprovisioning;

pub use preprovisioning::PreProvisioningOrchestrator;
