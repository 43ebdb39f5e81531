//! Remediation coordinator.
//!
//! Issues at most one [`RemediationTicket`] at a time and maps the actor's
//! outcome back to a resume decision. The coordinator does not trust a
//! reported success: a network success re-enters the network check, which
//! reads live connectivity again.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::abort::AbortReason;
use crate::ids::{AttemptId, TicketId};
use crate::params::ProvisioningParams;
use crate::preconditions::Precondition;
use crate::remediation::{RemediationKind, RemediationOutcome, RemediationTicket};

/// Programming errors in ticket handling. Never user-visible.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinatorError {
    #[error("a {kind} remediation is already outstanding (ticket {ticket})")]
    TicketOutstanding { kind: RemediationKind, ticket: TicketId },
    #[error("no outstanding remediation matches ticket {0}")]
    UnknownTicket(TicketId),
}

/// How the attempt continues after a remediation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResumeSignal {
    /// Re-run the checks starting at `from`.
    Reevaluate { from: Precondition },
    Abort(AbortReason),
}

#[derive(Debug, Default)]
pub struct RemediationCoordinator {
    outstanding: Option<RemediationTicket>,
}

impl RemediationCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outstanding(&self) -> Option<&RemediationTicket> {
        self.outstanding.as_ref()
    }

    pub fn begin(
        &mut self,
        kind: RemediationKind,
        attempt: &AttemptId,
        params: &ProvisioningParams,
    ) -> Result<RemediationTicket, CoordinatorError> {
        if let Some(existing) = &self.outstanding {
            return Err(CoordinatorError::TicketOutstanding {
                kind: existing.kind,
                ticket: existing.id.clone(),
            });
        }

        let ticket = RemediationTicket {
            id: TicketId::new(),
            kind,
            attempt: attempt.clone(),
            resume_params: params.clone(),
        };
        info!(%kind, ticket = %ticket.id, attempt = %attempt, "remediation requested");
        self.outstanding = Some(ticket.clone());
        Ok(ticket)
    }

    /// Consumes the outstanding ticket. A mismatched token leaves it in place.
    pub fn resolve(
        &mut self,
        ticket: &TicketId,
        outcome: RemediationOutcome,
    ) -> Result<ResumeSignal, CoordinatorError> {
        let kind = match &self.outstanding {
            Some(outstanding) if &outstanding.id == ticket => outstanding.kind,
            _ => {
                warn!(%ticket, "remediation outcome for unknown ticket");
                return Err(CoordinatorError::UnknownTicket(ticket.clone()));
            }
        };
        self.outstanding = None;

        let signal = Self::resume_signal(kind, outcome);
        info!(%kind, %ticket, ?outcome, ?signal, "remediation resolved");
        Ok(signal)
    }

    /// Drops the outstanding ticket without an outcome, e.g. when handing
    /// it to the actor failed.
    pub fn abandon(&mut self) -> Option<RemediationTicket> {
        let ticket = self.outstanding.take();
        if let Some(ticket) = &ticket {
            warn!(kind = %ticket.kind, ticket = %ticket.id, "remediation ticket abandoned");
        }
        ticket
    }

    pub fn resume_signal(kind: RemediationKind, outcome: RemediationOutcome) -> ResumeSignal {
        match (kind, outcome) {
            (RemediationKind::Encryption, RemediationOutcome::Cancelled) => {
                ResumeSignal::Abort(AbortReason::UserCancelledEncryption)
            }
            (RemediationKind::Network, RemediationOutcome::Cancelled) => {
                ResumeSignal::Abort(AbortReason::UserCancelledNetwork)
            }
            (RemediationKind::Network, RemediationOutcome::Failed) => {
                ResumeSignal::Abort(AbortReason::RemediationFailed {
                    kind: RemediationKind::Network,
                })
            }
            // Only a cancelled encryption ends the attempt; any other
            // encryption outcome is taken as satisfied. The network check
            // re-reads connectivity either way.
            (RemediationKind::Encryption, RemediationOutcome::Success | RemediationOutcome::Failed)
            | (RemediationKind::Network, RemediationOutcome::Success) => {
                ResumeSignal::Reevaluate {
                    from: Precondition::Network,
                }
            }
        }
    }
}
