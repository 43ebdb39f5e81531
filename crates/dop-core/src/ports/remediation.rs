use async_trait::async_trait;

use crate::remediation::RemediationTicket;

/// Hands remediation requests to external actors.
///
/// Fire-and-forget: the outcome arrives later through the orchestrator's
/// resume entry point, tagged with the ticket id. It may never arrive.
#[async_trait]
pub trait RemediationPort: Send + Sync {
    async fn request(&self, ticket: &RemediationTicket) -> anyhow::Result<()>;
}
