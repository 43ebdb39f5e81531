//! Consent ports
//!
//! `ConsentStorePort` persists the only durable piece of attempt state.
//! `ConsentPromptPort` shows the confirmation step.

use async_trait::async_trait;

use crate::consent::{ConsentFlag, ConsentPrompt, ConsentRecord};
use crate::ids::AttemptId;

#[async_trait]
pub trait ConsentStorePort: Send + Sync {
    /// Flag of `attempt` for `admin_package`; unset when nothing was stored
    /// for that pair.
    async fn load(&self, attempt: &AttemptId, admin_package: &str)
        -> anyhow::Result<ConsentFlag>;

    async fn save(&self, record: &ConsentRecord) -> anyhow::Result<()>;

    /// Forget any stored flag (new attempt).
    async fn clear(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ConsentPromptPort: Send + Sync {
    async fn present_consent(&self, prompt: &ConsentPrompt) -> anyhow::Result<()>;
}
