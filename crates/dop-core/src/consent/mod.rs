//! Consent gate.
//!
//! Decides whether the user must explicitly confirm that an admin takes
//! control of the device. The flag is the only state that must survive a
//! remediation round-trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ids::AttemptId;
use crate::params::{ComponentName, ProvisioningParams};
use crate::preconditions::CallerClass;

/// Whether the user already consented in this attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentFlag {
    pub user_consented: bool,
}

/// Persisted form of the flag, keyed to its attempt and the admin the user
/// agreed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub attempt: AttemptId,
    /// Records written without an admin never match.
    #[serde(default)]
    pub admin_package: String,
    pub user_consented: bool,
    pub updated_at: DateTime<Utc>,
}

impl ConsentRecord {
    pub fn new(attempt: AttemptId, admin_package: impl Into<String>, flag: ConsentFlag) -> Self {
        Self {
            attempt,
            admin_package: admin_package.into(),
            user_consented: flag.user_consented,
            updated_at: Utc::now(),
        }
    }

    pub fn flag(&self) -> ConsentFlag {
        ConsentFlag {
            user_consented: self.user_consented,
        }
    }

    /// The stored flag if it was given for `attempt` and `admin_package`,
    /// unset otherwise.
    pub fn flag_for(&self, attempt: &AttemptId, admin_package: &str) -> ConsentFlag {
        if &self.attempt == attempt
            && !self.admin_package.is_empty()
            && self.admin_package == admin_package
        {
            self.flag()
        } else {
            ConsentFlag::default()
        }
    }
}

/// What the confirmation step shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentPrompt {
    pub attempt: AttemptId,
    pub admin_package: String,
    pub admin_component: Option<ComponentName>,
}

#[derive(Debug, Clone, Default)]
pub struct ConsentGate {
    flag: ConsentFlag,
}

impl ConsentGate {
    pub fn new(flag: ConsentFlag) -> Self {
        Self { flag }
    }

    pub fn flag(&self) -> ConsentFlag {
        self.flag
    }

    /// Discovery-triggered and secondary-user attempts never ask.
    pub fn requires_consent(&self, params: &ProvisioningParams, caller: CallerClass) -> bool {
        !(self.flag.user_consented
            || params.started_by_discovery
            || caller != CallerClass::Primary)
    }

    pub fn on_confirm(&mut self) {
        info!("user consented to device owner provisioning");
        self.flag.user_consented = true;
    }

    /// The attempt stays idle until the user explicitly proceeds again.
    pub fn on_cancel(&mut self) {
        info!("user dismissed consent; waiting for an explicit proceed");
    }
}
