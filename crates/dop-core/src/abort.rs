//! Terminal, user-visible reasons an attempt stops.

use serde::{Deserialize, Serialize};

use crate::parser::InvalidRequest;
use crate::preconditions::CallerClass;
use crate::remediation::RemediationKind;

/// Machine-distinguishable kind of an [`AbortReason`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbortKind {
    InvalidRequest,
    AlreadyProvisioned,
    FactoryResetProtected,
    UserCancelledEncryption,
    UserCancelledNetwork,
    RemediationFailed,
}

/// Why an attempt was aborted. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum AbortReason {
    #[error("invalid provisioning request: {0}")]
    InvalidRequest(#[from] InvalidRequest),
    #[error("{caller} already provisioned")]
    AlreadyProvisioned { caller: CallerClass },
    #[error("factory reset protection blocks provisioning")]
    FactoryResetProtected,
    #[error("user cancelled device encryption")]
    UserCancelledEncryption,
    #[error("user cancelled network selection")]
    UserCancelledNetwork,
    #[error("{kind} remediation failed")]
    RemediationFailed { kind: RemediationKind },
}

impl AbortReason {
    pub fn kind(&self) -> AbortKind {
        match self {
            Self::InvalidRequest(_) => AbortKind::InvalidRequest,
            Self::AlreadyProvisioned { .. } => AbortKind::AlreadyProvisioned,
            Self::FactoryResetProtected => AbortKind::FactoryResetProtected,
            Self::UserCancelledEncryption => AbortKind::UserCancelledEncryption,
            Self::UserCancelledNetwork => AbortKind::UserCancelledNetwork,
            Self::RemediationFailed { .. } => AbortKind::RemediationFailed,
        }
    }

    /// Cancellations are user decisions, not system failures.
    pub fn is_user_cancellation(&self) -> bool {
        matches!(
            self,
            Self::UserCancelledEncryption | Self::UserCancelledNetwork
        )
    }
}
