//! Device facts taken from configuration
//! 由配置提供的设备状态

use anyhow::Result;
use async_trait::async_trait;
use dop_core::config::PreflightConfig;
use dop_core::ports::DeviceStatePort;
use dop_core::preconditions::CallerClass;

pub struct ConfiguredDeviceState {
    caller: CallerClass,
    device_provisioned: bool,
    user_setup_complete: bool,
    frp_data_block_size: Option<u64>,
    device_encrypted: bool,
    encryption_exempt: bool,
    network_connected: bool,
}

impl ConfiguredDeviceState {
    /// Interprets the `[device]` and `[policy]` sections.
    ///
    /// An empty caller class means the device owner user.
    pub fn from_config(config: &PreflightConfig) -> Result<Self> {
        let caller = match config.device.caller_class.trim() {
            "" | "primary" | "device" => CallerClass::Primary,
            "secondary" | "user" => CallerClass::Secondary,
            other => return Err(anyhow::anyhow!("unknown caller class in config: {other:?}")),
        };

        Ok(Self {
            caller,
            device_provisioned: config.device.device_provisioned,
            user_setup_complete: config.device.user_setup_complete,
            frp_data_block_size: config.device.frp_data_block_size,
            device_encrypted: config.device.device_encrypted,
            encryption_exempt: config.encryption_exempt,
            network_connected: config.device.network_connected,
        })
    }
}

#[async_trait]
impl DeviceStatePort for ConfiguredDeviceState {
    async fn caller_class(&self) -> Result<CallerClass> {
        Ok(self.caller)
    }

    async fn is_device_provisioned(&self) -> Result<bool> {
        Ok(self.device_provisioned)
    }

    async fn is_user_setup_complete(&self) -> Result<bool> {
        Ok(self.user_setup_complete)
    }

    async fn frp_data_block_size(&self) -> Result<Option<u64>> {
        Ok(self.frp_data_block_size)
    }

    async fn is_device_encrypted(&self) -> Result<bool> {
        Ok(self.device_encrypted)
    }

    async fn is_encryption_exempt(&self) -> Result<bool> {
        Ok(self.encryption_exempt)
    }

    async fn is_network_connected(&self) -> Result<bool> {
        Ok(self.network_connected)
    }
}
