use crate::abort::AbortReason;
use crate::ids::AttemptId;
use crate::orchestration::OrchestrationState;

#[async_trait::async_trait]
pub trait PreProvisioningEventPort: Send + Sync {
    async fn emit_state_changed(&self, attempt: &AttemptId, state: &OrchestrationState);

    /// Show a terminal error to the user.
    async fn emit_aborted(&self, attempt: &AttemptId, reason: &AbortReason);
}
