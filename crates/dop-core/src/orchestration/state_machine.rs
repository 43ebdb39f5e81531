//! Pre-provisioning state machine.
//!
//! Defines a pure state transition function for the pre-provisioning flow.
//!
//! ```text
//! Init ──RequestAccepted──► CheckingOwnershipProvisioned ─┐
//!   │                                                      │ PreconditionsEvaluated
//!   └──RequestRejected──► Aborted                          ▼
//!                        ┌──────────── Abort ───────────► Aborted
//!                        ├── Remediate(k) ──► Checking(k) ──RemediationRequested──► Awaiting(k)
//!                        │                                                          │
//!                        │          ◄── RemediationResolved(Reevaluate) ────────────┘
//!                        └── Proceed ──► CheckingNetwork ──ConsentNotRequired──► Launching
//!                                              │
//!                                              └──ConsentRequired──► AwaitingConsent
//!                                                                       │ ConsentConfirmed
//!                                                                       ▼
//!                                                                    Launching ──ProvisioningFinished──► Done
//! ```

use crate::abort::AbortReason;
use crate::orchestration::{OrchestrationState, ProvisioningAction, ProvisioningEvent};
use crate::preconditions::{Decision, Precondition};
use crate::remediation::ResumeSignal;

/// Pure pre-provisioning state machine.
///
/// 纯状态机：不包含副作用。
pub struct ProvisioningStateMachine;

impl ProvisioningStateMachine {
    pub fn transition(
        state: OrchestrationState,
        event: ProvisioningEvent,
    ) -> (OrchestrationState, Vec<ProvisioningAction>) {
        match (state, event) {
            (OrchestrationState::Init, ProvisioningEvent::RequestAccepted) => (
                OrchestrationState::CheckingOwnershipProvisioned,
                vec![ProvisioningAction::Evaluate {
                    from: Precondition::NotYetProvisioned,
                }],
            ),
            (OrchestrationState::Init, ProvisioningEvent::RequestRejected { reason }) => {
                Self::abort(AbortReason::InvalidRequest(reason))
            }
            (state, ProvisioningEvent::PreconditionsEvaluated { decision })
                if state.checked_precondition().is_some() =>
            {
                match decision {
                    // Every check up to and including Network passed, so the
                    // consent step runs from CheckingNetwork whichever check
                    // the evaluation started at.
                    Decision::Proceed => (
                        OrchestrationState::CheckingNetwork,
                        vec![ProvisioningAction::ConsultConsent],
                    ),
                    Decision::Abort(reason) => Self::abort(reason),
                    Decision::Remediate(kind) => (
                        OrchestrationState::checking(kind.precondition()),
                        vec![ProvisioningAction::BeginRemediation { kind }],
                    ),
                }
            }
            (state, ProvisioningEvent::RemediationRequested { kind, ticket })
                if state.checked_precondition() == Some(kind.precondition()) =>
            {
                (OrchestrationState::awaiting(kind, ticket), Vec::new())
            }
            (state, ProvisioningEvent::RemediationResolved { signal })
                if state.pending_ticket().is_some() =>
            {
                match signal {
                    ResumeSignal::Reevaluate { from } => (
                        OrchestrationState::checking(from),
                        vec![ProvisioningAction::Evaluate { from }],
                    ),
                    ResumeSignal::Abort(reason) => Self::abort(reason),
                }
            }
            (OrchestrationState::CheckingNetwork, ProvisioningEvent::ConsentRequired) => (
                OrchestrationState::AwaitingConsent,
                vec![ProvisioningAction::PresentConsent],
            ),
            (OrchestrationState::CheckingNetwork, ProvisioningEvent::ConsentNotRequired) => (
                OrchestrationState::Launching,
                vec![ProvisioningAction::LaunchProvisioning],
            ),
            (OrchestrationState::AwaitingConsent, ProvisioningEvent::ConsentConfirmed) => (
                OrchestrationState::Launching,
                vec![
                    ProvisioningAction::PersistConsent,
                    ProvisioningAction::LaunchProvisioning,
                ],
            ),
            (OrchestrationState::AwaitingConsent, ProvisioningEvent::ConsentCancelled) => {
                (OrchestrationState::AwaitingConsent, Vec::new())
            }
            (OrchestrationState::AwaitingConsent, ProvisioningEvent::ProceedRequested) => (
                OrchestrationState::AwaitingConsent,
                vec![ProvisioningAction::PresentConsent],
            ),
            (OrchestrationState::Launching, ProvisioningEvent::ProvisioningFinished { result }) => {
                (OrchestrationState::Done { result }, Vec::new())
            }
            (state, ProvisioningEvent::RetryRequested) => match state.checked_precondition() {
                Some(from) => (state, vec![ProvisioningAction::Evaluate { from }]),
                // The ticket was consumed but resuming failed; every
                // non-aborting outcome resumes at the network check.
                None if state.pending_ticket().is_some() => (
                    OrchestrationState::CheckingNetwork,
                    vec![ProvisioningAction::Evaluate {
                        from: Precondition::Network,
                    }],
                ),
                None => (state, Vec::new()),
            },
            (state, _event) => (state, Vec::new()),
        }
    }

    fn abort(reason: AbortReason) -> (OrchestrationState, Vec<ProvisioningAction>) {
        (
            OrchestrationState::Aborted {
                reason: reason.clone(),
            },
            vec![ProvisioningAction::ReportAbort { reason }],
        )
    }
}
