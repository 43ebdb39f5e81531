//! Device owner pre-provisioning preflight
//!
//! 设备所有者预配置前置检查

pub mod adapters;
pub mod bootstrap;
pub mod cli;

use anyhow::Context;
use dop_core::config::PreflightConfig;
use dop_core::orchestration::{AttemptOutcome, OrchestrationState};
use dop_core::request::ProvisioningRequest;
use tracing::{info, warn};

use crate::bootstrap::{build_orchestrator, load_config};
use crate::cli::Cli;

/// Config from `--config`, or defaults under the platform data directory.
pub fn resolve_config(cli: &Cli) -> anyhow::Result<PreflightConfig> {
    match &cli.config {
        Some(path) => load_config(path.clone()),
        None => Ok(PreflightConfig::with_system_defaults(
            dop_infra::fs::app_data_dir()?,
        )),
    }
}

/// Drive one attempt as far as the command line allows.
pub async fn run(cli: &Cli, config: &PreflightConfig) -> anyhow::Result<AttemptOutcome> {
    let raw = tokio::fs::read_to_string(&cli.request)
        .await
        .with_context(|| format!("Failed to read request file: {}", cli.request.display()))?;
    let request: ProvisioningRequest =
        serde_json::from_str(&raw).context("Failed to parse provisioning request")?;

    let orchestrator = build_orchestrator(config)?;
    let mut outcome = orchestrator.start(request).await?;

    if let Some(arg) = cli.remediation_outcome {
        match orchestrator.outstanding_ticket().await {
            Some(ticket) => {
                outcome = orchestrator
                    .on_remediation_outcome(ticket.id, arg.into())
                    .await?;
            }
            None => warn!(?arg, "no remediation outstanding; outcome ignored"),
        }
    }

    if orchestrator.state().await == OrchestrationState::AwaitingConsent {
        if cli.confirm {
            outcome = orchestrator.confirm_consent().await?;
        } else if cli.cancel {
            outcome = orchestrator.cancel_consent().await?;
        }
    }

    info!(attempt = %orchestrator.attempt_id().await, "preflight finished");
    Ok(outcome)
}
