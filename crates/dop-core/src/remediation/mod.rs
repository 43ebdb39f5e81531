//! External remediation: tickets, outcomes and resume decisions.

mod coordinator;
mod ticket;

pub use coordinator::{CoordinatorError, RemediationCoordinator, ResumeSignal};
pub use ticket::RemediationTicket;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::preconditions::Precondition;

/// Corrective action an external actor performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemediationKind {
    Encryption,
    Network,
}

impl RemediationKind {
    /// The precondition this remediation satisfies.
    pub fn precondition(self) -> Precondition {
        match self {
            Self::Encryption => Precondition::Encryption,
            Self::Network => Precondition::Network,
        }
    }
}

impl fmt::Display for RemediationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encryption => f.write_str("encryption"),
            Self::Network => f.write_str("network"),
        }
    }
}

/// Terminal outcome reported by the external actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemediationOutcome {
    Success,
    Cancelled,
    Failed,
}
