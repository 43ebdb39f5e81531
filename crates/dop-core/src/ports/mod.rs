//! Port interfaces for the application layer
//!
//! Ports define the contract between the pre-provisioning orchestrator and
//! the platform. This follows Hexagonal Architecture principles, keeping the
//! decision logic independent of how facts are read or actions performed.
//!
//! ## Port Placement Guidelines
//!
//! Before adding a new port to `dop-core/ports`, ask yourself three questions:
//!
//! 1. **Does this port represent a platform capability?**
//! 2. **Will it be depended upon by the orchestrator or an adapter?**
//! 3. **Is it implemented by the infrastructure or platform layer?**
//!
//! If all three answers are **yes**, place it in `dop-core/ports`.
//! Otherwise, place it in the relevant domain module.

mod consent;
mod device_state;
mod event_port;
mod provisioning_executor;
mod remediation;

pub use consent::{ConsentPromptPort, ConsentStorePort};
pub use device_state::DeviceStatePort;
pub use event_port::PreProvisioningEventPort;
pub use provisioning_executor::ProvisioningExecutorPort;
pub use remediation::RemediationPort;
