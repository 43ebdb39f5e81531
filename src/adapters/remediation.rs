//! Remediation port that only records the hand-off
//! 仅记录交接的修复端口

use anyhow::Result;
use async_trait::async_trait;
use dop_core::ports::RemediationPort;
use dop_core::remediation::RemediationTicket;
use tracing::{debug, info};

/// Logs each ticket; the outcome is supplied on the command line.
#[derive(Debug, Default)]
pub struct LoggingRemediationPort;

/// Resume request as logged: secrets are masked.
fn resume_for_log(ticket: &RemediationTicket) -> Result<String> {
    Ok(serde_json::to_string(&ticket.resume_request().redacted())?)
}

#[async_trait]
impl RemediationPort for LoggingRemediationPort {
    async fn request(&self, ticket: &RemediationTicket) -> Result<()> {
        info!(
            kind = %ticket.kind,
            ticket = %ticket.id,
            attempt = %ticket.attempt,
            "remediation handed to external actor"
        );
        let resume = resume_for_log(ticket)?;
        debug!(%resume, "resume request for restart");
        Ok(())
    }
}
