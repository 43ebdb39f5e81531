//! Device state port
//!
//! Read-only access to the platform facts the precondition evaluator needs.

use async_trait::async_trait;

use crate::preconditions::{CallerClass, EnvironmentSnapshot, Precondition};

#[async_trait]
pub trait DeviceStatePort: Send + Sync {
    /// Whether the attempt runs on the device owner user.
    async fn caller_class(&self) -> anyhow::Result<CallerClass>;

    async fn is_device_provisioned(&self) -> anyhow::Result<bool>;

    async fn is_user_setup_complete(&self) -> anyhow::Result<bool>;

    /// `None` when the platform has no factory reset protection.
    async fn frp_data_block_size(&self) -> anyhow::Result<Option<u64>>;

    async fn is_device_encrypted(&self) -> anyhow::Result<bool>;

    /// System policy waives the encryption requirement.
    async fn is_encryption_exempt(&self) -> anyhow::Result<bool>;

    async fn is_network_connected(&self) -> anyhow::Result<bool>;

    /// Read the facts one check needs, leaving the others at their defaults.
    ///
    /// The reset protection block is only queried for primary callers, and
    /// the exemption policy only when the device is not encrypted.
    async fn facts_for(
        &self,
        precondition: Precondition,
        caller: CallerClass,
    ) -> anyhow::Result<EnvironmentSnapshot> {
        let mut facts = EnvironmentSnapshot::default();
        match precondition {
            Precondition::NotYetProvisioned => match caller {
                CallerClass::Primary => facts.device_provisioned = self.is_device_provisioned().await?,
                CallerClass::Secondary => {
                    facts.user_setup_complete = self.is_user_setup_complete().await?
                }
            },
            Precondition::FactoryResetProtection => {
                if caller == CallerClass::Primary {
                    facts.frp_data_block_size = self.frp_data_block_size().await?;
                }
            }
            Precondition::Encryption => {
                facts.device_encrypted = self.is_device_encrypted().await?;
                if !facts.device_encrypted {
                    facts.encryption_exempt = self.is_encryption_exempt().await?;
                }
            }
            Precondition::Network => facts.network_connected = self.is_network_connected().await?,
        }
        Ok(facts)
    }
}
