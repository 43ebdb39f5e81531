//! Inbound provisioning requests.
//!
//! A request is the raw trigger of one provisioning attempt. It is immutable
//! once received and is never interpreted outside [`crate::parser`].

pub mod keys;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::AttemptId;

/// Mime type of the tag record carrying provisioning properties.
pub const PROVISIONING_MIME_TYPE: &str = "application/com.android.managedprovisioning";

/// Action identifier of an inbound request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestAction {
    /// A provisioning tag was discovered (e.g. NFC bump).
    NdefDiscovered,
    /// Internal direct trigger kept for resume and older callers.
    LegacyProvisionManagedDevice,
    /// Public direct trigger; the caller must be the admin it names.
    ProvisionManagedDevice,
    /// Anything else.
    Unknown(String),
}

impl RequestAction {
    pub const NDEF_DISCOVERED: &'static str = "action.ndef_discovered";
    pub const LEGACY_PROVISION_MANAGED_DEVICE: &'static str =
        "action.legacy.provision_managed_device";
    pub const PROVISION_MANAGED_DEVICE: &'static str = "action.provision_managed_device";

    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            Self::NDEF_DISCOVERED => Self::NdefDiscovered,
            Self::LEGACY_PROVISION_MANAGED_DEVICE => Self::LegacyProvisionManagedDevice,
            Self::PROVISION_MANAGED_DEVICE => Self::ProvisionManagedDevice,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn identifier(&self) -> &str {
        match self {
            Self::NdefDiscovered => Self::NDEF_DISCOVERED,
            Self::LegacyProvisionManagedDevice => Self::LEGACY_PROVISION_MANAGED_DEVICE,
            Self::ProvisionManagedDevice => Self::PROVISION_MANAGED_DEVICE,
            Self::Unknown(identifier) => identifier,
        }
    }
}

impl From<String> for RequestAction {
    fn from(identifier: String) -> Self {
        Self::from_identifier(&identifier)
    }
}

impl From<RequestAction> for String {
    fn from(action: RequestAction) -> Self {
        action.identifier().to_string()
    }
}

impl std::fmt::Display for RequestAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.identifier())
    }
}

/// One record read from a discovered tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryRecord {
    pub mime_type: String,
    /// Properties-formatted text body.
    pub payload: String,
}

/// Opaque request payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestPayload {
    /// Data read from a discovered tag.
    Discovery { records: Vec<DiscoveryRecord> },
    /// Direct extras attached to the trigger.
    Extras { extras: Map<String, Value> },
}

impl RequestPayload {
    pub fn empty_extras() -> Self {
        Self::Extras { extras: Map::new() }
    }
}

/// Raw provisioning trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisioningRequest {
    pub action: RequestAction,
    pub payload: RequestPayload,
    /// Package identity of the caller, when the platform could establish one.
    #[serde(default)]
    pub calling_principal: Option<String>,
    /// Set when the request re-delivers an attempt suspended for remediation.
    #[serde(default)]
    pub resumed_attempt: Option<AttemptId>,
}

impl ProvisioningRequest {
    pub fn new(action: RequestAction, payload: RequestPayload) -> Self {
        Self {
            action,
            payload,
            calling_principal: None,
            resumed_attempt: None,
        }
    }

    pub fn with_calling_principal(mut self, principal: impl Into<String>) -> Self {
        self.calling_principal = Some(principal.into());
        self
    }

    pub fn resuming(mut self, attempt: AttemptId) -> Self {
        self.resumed_attempt = Some(attempt);
        self
    }

    /// Copy safe to log: secret values are replaced with [`REDACTED`].
    pub fn redacted(&self) -> Self {
        let payload = match &self.payload {
            RequestPayload::Extras { extras } => {
                let mut extras = extras.clone();
                for key in keys::SECRET_KEYS {
                    if let Some(value) = extras.get_mut(*key) {
                        *value = Value::String(REDACTED.to_string());
                    }
                }
                RequestPayload::Extras { extras }
            }
            RequestPayload::Discovery { records } => RequestPayload::Discovery {
                records: records
                    .iter()
                    .map(|record| DiscoveryRecord {
                        mime_type: record.mime_type.clone(),
                        payload: redact_properties(&record.payload),
                    })
                    .collect(),
            },
        };
        Self {
            payload,
            ..self.clone()
        }
    }
}

/// Placeholder written over secret values by [`ProvisioningRequest::redacted`].
pub const REDACTED: &str = "<redacted>";

fn redact_properties(body: &str) -> String {
    body.lines()
        .map(|line| match line.split_once(['=', ':']) {
            Some((key, _)) if keys::SECRET_KEYS.contains(&key.trim()) => {
                format!("{}={}", key.trim_end(), REDACTED)
            }
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
