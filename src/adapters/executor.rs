//! Dry-run provisioning executor
//! 演练模式的配置执行器

use anyhow::Result;
use async_trait::async_trait;
use dop_core::orchestration::ProvisioningResult;
use dop_core::params::ProvisioningParams;
use dop_core::ports::ProvisioningExecutorPort;
use tracing::info;

/// Reports success without touching the device.
#[derive(Debug, Default)]
pub struct DryRunProvisioningExecutor;

#[async_trait]
impl ProvisioningExecutorPort for DryRunProvisioningExecutor {
    async fn launch(&self, params: &ProvisioningParams) -> Result<ProvisioningResult> {
        info!(
            admin = ?params.infer_device_admin_package_name(),
            wifi = ?params.wifi,
            locale = ?params.locale,
            "dry run: provisioning would start now"
        );
        Ok(ProvisioningResult::Succeeded)
    }
}
