use serde::{Deserialize, Serialize};

use crate::abort::AbortReason;
use crate::preconditions::Precondition;
use crate::remediation::RemediationKind;

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProvisioningAction {
    /// Run the evaluator starting at `from`.
    ///
    /// 从 `from` 开始评估前置条件。
    Evaluate { from: Precondition },
    BeginRemediation { kind: RemediationKind },
    /// Ask the consent gate whether confirmation is needed.
    ///
    /// 询问是否需要用户确认。
    ConsultConsent,
    PresentConsent,
    /// Persist the consent flag for this attempt.
    ///
    /// 持久化本次尝试的确认标记。
    PersistConsent,
    LaunchProvisioning,
    ReportAbort { reason: AbortReason },
}
