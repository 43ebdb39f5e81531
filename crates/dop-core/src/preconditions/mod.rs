//! Ordered precondition evaluation.
//!
//! ```text
//! NotYetProvisioned ──► FactoryResetProtection ──► Encryption ──► Network ──► Proceed
//!        │                       │                      │             │
//!        ▼                       ▼                      ▼             ▼
//!      Abort                   Abort           Remediate(Enc)   Remediate(Net)
//! ```
//!
//! The first failing check decides; later checks are neither run nor read.

mod environment;

pub use environment::{CallerClass, EnvironmentFacts, EnvironmentSnapshot};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::abort::AbortReason;
use crate::params::ProvisioningParams;
use crate::remediation::RemediationKind;

/// One precondition, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Precondition {
    NotYetProvisioned,
    FactoryResetProtection,
    Encryption,
    Network,
}

impl Precondition {
    pub const ORDER: [Precondition; 4] = [
        Precondition::NotYetProvisioned,
        Precondition::FactoryResetProtection,
        Precondition::Encryption,
        Precondition::Network,
    ];

    /// This check and every check after it.
    pub fn and_following(self) -> impl Iterator<Item = Precondition> {
        Self::ORDER.into_iter().filter(move |p| *p >= self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Passed,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRecord {
    pub precondition: Precondition,
    pub verdict: Verdict,
}

/// Next required action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Proceed,
    Abort(AbortReason),
    Remediate(RemediationKind),
}

/// Decision plus the checks that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub decision: Decision,
    pub trace: Vec<CheckRecord>,
}

enum Outcome {
    Pass,
    Skip,
    Fail(Decision),
}

pub struct PreconditionEvaluator;

impl PreconditionEvaluator {
    /// Runs the checks starting at `from`, short-circuiting on the first failure.
    pub fn evaluate<E>(
        from: Precondition,
        params: &ProvisioningParams,
        caller: CallerClass,
        env: &E,
    ) -> Evaluation
    where
        E: EnvironmentFacts + ?Sized,
    {
        let mut trace = Vec::with_capacity(Precondition::ORDER.len());
        for precondition in from.and_following() {
            let (record, failed) = Self::check_one(precondition, params, caller, env);
            trace.push(record);
            if let Some(decision) = failed {
                return Evaluation { decision, trace };
            }
        }
        Evaluation {
            decision: Decision::Proceed,
            trace,
        }
    }

    /// Runs a single check. Returns the decision when it fails.
    ///
    /// Callers that fetch facts per check drive the order themselves with
    /// [`Precondition::and_following`].
    pub fn check_one<E>(
        precondition: Precondition,
        params: &ProvisioningParams,
        caller: CallerClass,
        env: &E,
    ) -> (CheckRecord, Option<Decision>)
    where
        E: EnvironmentFacts + ?Sized,
    {
        let outcome = Self::check(precondition, params, caller, env);
        let (verdict, decision) = match outcome {
            Outcome::Pass => (Verdict::Passed, None),
            Outcome::Skip => (Verdict::Skipped, None),
            Outcome::Fail(decision) => (Verdict::Failed, Some(decision)),
        };
        debug!(?precondition, ?verdict, "precondition checked");
        (
            CheckRecord {
                precondition,
                verdict,
            },
            decision,
        )
    }

    fn check<E>(
        precondition: Precondition,
        params: &ProvisioningParams,
        caller: CallerClass,
        env: &E,
    ) -> Outcome
    where
        E: EnvironmentFacts + ?Sized,
    {
        match precondition {
            Precondition::NotYetProvisioned => {
                let provisioned = match caller {
                    CallerClass::Primary => env.device_provisioned(),
                    CallerClass::Secondary => env.user_setup_complete(),
                };
                if provisioned {
                    Outcome::Fail(Decision::Abort(AbortReason::AlreadyProvisioned { caller }))
                } else {
                    Outcome::Pass
                }
            }
            Precondition::FactoryResetProtection => {
                if caller != CallerClass::Primary {
                    debug!("reset protection check skipped on secondary users");
                    return Outcome::Skip;
                }
                match env.frp_data_block_size() {
                    None => {
                        debug!("reset protection not supported");
                        Outcome::Pass
                    }
                    Some(size) => {
                        debug!(size, "reset protection data block size");
                        if size > 0 {
                            Outcome::Fail(Decision::Abort(AbortReason::FactoryResetProtected))
                        } else {
                            Outcome::Pass
                        }
                    }
                }
            }
            Precondition::Encryption => {
                if params.skip_encryption || env.device_encrypted() || env.encryption_exempt() {
                    Outcome::Pass
                } else {
                    Outcome::Fail(Decision::Remediate(RemediationKind::Encryption))
                }
            }
            Precondition::Network => {
                // A pre-specified network is joined by the executor, not here.
                if params.wifi.has_ssid() || env.network_connected() {
                    Outcome::Pass
                } else {
                    Outcome::Fail(Decision::Remediate(RemediationKind::Network))
                }
            }
        }
    }
}
