use serde::{Deserialize, Serialize};

use crate::ids::TicketId;
use crate::orchestration::ProvisioningResult;
use crate::parser::InvalidRequest;
use crate::preconditions::Decision;
use crate::remediation::{RemediationKind, ResumeSignal};

/// Events that drive the pre-provisioning flow.
///
/// 驱动预配置流程的事件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProvisioningEvent {
    /// Request parsed and authenticated.
    ///
    /// 请求解析并校验通过。
    RequestAccepted,
    RequestRejected { reason: InvalidRequest },
    /// Evaluator result.
    ///
    /// 前置条件评估结果。
    PreconditionsEvaluated { decision: Decision },
    /// Remediation handed to the external actor.
    ///
    /// 已向外部执行者发出修复请求。
    RemediationRequested { kind: RemediationKind, ticket: TicketId },
    /// External actor reported back (callback).
    ///
    /// 外部执行者回调结果。
    RemediationResolved { signal: ResumeSignal },
    ConsentRequired,
    ConsentNotRequired,
    /// User confirms.
    ///
    /// 用户确认。
    ConsentConfirmed,
    /// User dismisses the confirmation step.
    ///
    /// 用户取消确认。
    ConsentCancelled,
    /// User explicitly asks to proceed again.
    ///
    /// 用户再次点击继续。
    ProceedRequested,
    ProvisioningFinished { result: ProvisioningResult },
    /// Re-run the interrupted checks after a port failure.
    ///
    /// 端口失败后重新评估。
    RetryRequested,
}
