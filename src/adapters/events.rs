use async_trait::async_trait;
use dop_core::abort::AbortReason;
use dop_core::ids::AttemptId;
use dop_core::orchestration::OrchestrationState;
use dop_core::ports::PreProvisioningEventPort;
use tracing::{debug, error, info};

#[derive(Debug, Default)]
pub struct LoggingEventPort;

#[async_trait]
impl PreProvisioningEventPort for LoggingEventPort {
    async fn emit_state_changed(&self, attempt: &AttemptId, state: &OrchestrationState) {
        debug!(%attempt, ?state, "pre-provisioning state changed");
    }

    async fn emit_aborted(&self, attempt: &AttemptId, reason: &AbortReason) {
        if reason.is_user_cancellation() {
            info!(%attempt, %reason, "pre-provisioning cancelled");
        } else {
            error!(%attempt, kind = ?reason.kind(), %reason, "pre-provisioning aborted");
        }
    }
}
