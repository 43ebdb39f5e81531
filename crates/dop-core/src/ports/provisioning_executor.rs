use async_trait::async_trait;

use crate::orchestration::ProvisioningResult;
use crate::params::ProvisioningParams;

/// Runs the actual provisioning once every precondition holds.
#[async_trait]
pub trait ProvisioningExecutorPort: Send + Sync {
    async fn launch(&self, params: &ProvisioningParams) -> anyhow::Result<ProvisioningResult>;
}
