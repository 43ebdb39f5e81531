use std::fmt;

use serde::{Deserialize, Serialize};

/// Which principal the attempt runs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallerClass {
    /// Device-wide owner user.
    Primary,
    /// User-scoped attempt on a secondary user.
    Secondary,
}

impl fmt::Display for CallerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("device"),
            Self::Secondary => f.write_str("user"),
        }
    }
}

/// Platform facts read by the evaluator.
///
/// Reads must be side-effect free; the evaluator only reads the facts of the
/// checks it actually runs.
pub trait EnvironmentFacts {
    fn device_provisioned(&self) -> bool;
    fn user_setup_complete(&self) -> bool;
    /// Size of the factory-reset-protection data block, `None` when the
    /// platform has no such protection.
    fn frp_data_block_size(&self) -> Option<u64>;
    fn device_encrypted(&self) -> bool;
    /// System policy waives the encryption requirement.
    fn encryption_exempt(&self) -> bool;
    fn network_connected(&self) -> bool;
}

/// Point-in-time copy of the platform facts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    pub device_provisioned: bool,
    pub user_setup_complete: bool,
    pub frp_data_block_size: Option<u64>,
    pub device_encrypted: bool,
    pub encryption_exempt: bool,
    pub network_connected: bool,
}

impl EnvironmentFacts for EnvironmentSnapshot {
    fn device_provisioned(&self) -> bool {
        self.device_provisioned
    }

    fn user_setup_complete(&self) -> bool {
        self.user_setup_complete
    }

    fn frp_data_block_size(&self) -> Option<u64> {
        self.frp_data_block_size
    }

    fn device_encrypted(&self) -> bool {
        self.device_encrypted
    }

    fn encryption_exempt(&self) -> bool {
        self.encryption_exempt
    }

    fn network_connected(&self) -> bool {
        self.network_connected
    }
}
