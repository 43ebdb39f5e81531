use anyhow::Result;
use async_trait::async_trait;
use dop_core::consent::ConsentPrompt;
use dop_core::ports::ConsentPromptPort;
use tracing::info;

#[derive(Debug, Default)]
pub struct LoggingConsentPrompt;

#[async_trait]
impl ConsentPromptPort for LoggingConsentPrompt {
    async fn present_consent(&self, prompt: &ConsentPrompt) -> Result<()> {
        info!(
            attempt = %prompt.attempt,
            admin = %prompt.admin_package,
            component = ?prompt.admin_component.as_ref().map(|c| c.flatten()),
            "the admin app will control this device; confirm with --confirm"
        );
        Ok(())
    }
}
