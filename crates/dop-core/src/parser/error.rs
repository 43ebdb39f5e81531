use serde::{Deserialize, Serialize};

/// Why a request could not become [`crate::params::ProvisioningParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidRequestKind {
    UnknownAction,
    MalformedPayload,
    MissingAdmin,
    /// The caller of a self-asserting request could not be identified.
    CallerUnknown,
    /// The caller named a different admin than itself.
    PermissionDenied,
}

/// Malformed or unauthorized request. Always terminal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct InvalidRequest {
    pub kind: InvalidRequestKind,
    pub message: String,
}

impl InvalidRequest {
    pub fn unknown_action(action: &str) -> Self {
        Self {
            kind: InvalidRequestKind::UnknownAction,
            message: format!("unknown request action {action}"),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: InvalidRequestKind::MalformedPayload,
            message: message.into(),
        }
    }

    pub fn missing_admin() -> Self {
        Self {
            kind: InvalidRequestKind::MissingAdmin,
            message: "request does not name a device admin package or component".to_string(),
        }
    }

    pub fn caller_unknown() -> Self {
        Self {
            kind: InvalidRequestKind::CallerUnknown,
            message: "calling package is unknown; the request must be sent so that its caller \
                      can be identified"
                .to_string(),
        }
    }

    pub fn permission_denied(caller: &str, admin: &str) -> Self {
        Self {
            kind: InvalidRequestKind::PermissionDenied,
            message: format!(
                "permission denied: calling package {caller} tried to set {admin} as device owner"
            ),
        }
    }
}
