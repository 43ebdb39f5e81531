use serde::{Deserialize, Serialize};

use crate::abort::AbortReason;
use crate::ids::TicketId;
use crate::preconditions::Precondition;
use crate::remediation::RemediationKind;

/// Terminal result reported by the provisioning executor. Relayed, not interpreted.
///
/// 执行器返回的最终结果（仅转发，不解释）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProvisioningResult {
    Succeeded,
    Failed { message: String },
}

/// Pre-provisioning flow state.
///
/// 预配置流程状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrchestrationState {
    /// Request not parsed yet.
    ///
    /// 尚未解析请求。
    Init,
    CheckingOwnershipProvisioned,
    CheckingFactoryResetProtection,
    CheckingEncryption,
    /// Suspended until the encryption actor reports back (possibly never).
    ///
    /// 等待加密结果（可能跨越重启）。
    AwaitingEncryptionRemediation { ticket: TicketId },
    CheckingNetwork,
    /// Suspended until the network actor reports back.
    ///
    /// 等待网络选择结果。
    AwaitingNetworkRemediation { ticket: TicketId },
    /// Waiting for explicit user confirmation.
    ///
    /// 等待用户确认。
    AwaitingConsent,
    /// Provisioning handed to the executor.
    ///
    /// 已交给执行器。
    Launching,
    Aborted { reason: AbortReason },
    Done { result: ProvisioningResult },
}

impl OrchestrationState {
    /// State evaluating `precondition`.
    pub fn checking(precondition: Precondition) -> Self {
        match precondition {
            Precondition::NotYetProvisioned => Self::CheckingOwnershipProvisioned,
            Precondition::FactoryResetProtection => Self::CheckingFactoryResetProtection,
            Precondition::Encryption => Self::CheckingEncryption,
            Precondition::Network => Self::CheckingNetwork,
        }
    }

    pub fn awaiting(kind: RemediationKind, ticket: TicketId) -> Self {
        match kind {
            RemediationKind::Encryption => Self::AwaitingEncryptionRemediation { ticket },
            RemediationKind::Network => Self::AwaitingNetworkRemediation { ticket },
        }
    }

    pub fn checked_precondition(&self) -> Option<Precondition> {
        match self {
            Self::CheckingOwnershipProvisioned => Some(Precondition::NotYetProvisioned),
            Self::CheckingFactoryResetProtection => Some(Precondition::FactoryResetProtection),
            Self::CheckingEncryption => Some(Precondition::Encryption),
            Self::CheckingNetwork => Some(Precondition::Network),
            _ => None,
        }
    }

    pub fn pending_ticket(&self) -> Option<&TicketId> {
        match self {
            Self::AwaitingEncryptionRemediation { ticket }
            | Self::AwaitingNetworkRemediation { ticket } => Some(ticket),
            _ => None,
        }
    }

    /// Waiting on something outside the orchestrator.
    pub fn is_suspended(&self) -> bool {
        matches!(
            self,
            Self::AwaitingEncryptionRemediation { .. }
                | Self::AwaitingNetworkRemediation { .. }
                | Self::AwaitingConsent
        )
    }

    /// No transitions leave a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Aborted { .. } | Self::Done { .. })
    }
}

/// What an attempt reports to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptOutcome {
    /// Suspended or still running.
    Pending(OrchestrationState),
    Completed(ProvisioningResult),
    Aborted(AbortReason),
}

impl From<OrchestrationState> for AttemptOutcome {
    fn from(state: OrchestrationState) -> Self {
        match state {
            OrchestrationState::Aborted { reason } => Self::Aborted(reason),
            OrchestrationState::Done { result } => Self::Completed(result),
            other => Self::Pending(other),
        }
    }
}
