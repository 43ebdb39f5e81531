//! # dop-core
//!
//! Core domain models and decision logic for device-owner pre-provisioning.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod abort;
pub mod config;
pub mod consent;
pub mod ids;
pub mod orchestration;
pub mod params;
pub mod parser;
pub mod ports;
pub mod preconditions;
pub mod remediation;
pub mod request;

// Re-export commonly used types at the crate root
pub use abort::{AbortKind, AbortReason};
pub use config::PreflightConfig;
pub use consent::{ConsentFlag, ConsentGate, ConsentPrompt, ConsentRecord};
pub use ids::{AttemptId, TicketId};
pub use orchestration::{AttemptOutcome, OrchestrationState, ProvisioningResult};
pub use params::{ComponentName, ProvisioningParams};
pub use parser::{InvalidRequest, InvalidRequestKind, RequestParser};
pub use preconditions::{CallerClass, Decision, Precondition, PreconditionEvaluator};
pub use remediation::{RemediationKind, RemediationOutcome, RemediationTicket};
pub use request::{ProvisioningRequest, RequestAction, RequestPayload};
