//! Command line surface of the preflight binary.

use clap::{Parser, ValueEnum};
use dop_core::remediation::RemediationOutcome;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dop-preflight")]
#[command(
    version,
    about = "Pre-provisioning gate for device owner setup",
    long_about = None
)]
pub struct Cli {
    /// TOML config file; defaults to values under the platform data directory
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Provisioning request as JSON
    #[arg(short, long, value_name = "PATH")]
    pub request: PathBuf,

    /// Outcome reported for the remediation the attempt suspends on
    #[arg(long, value_enum, value_name = "OUTCOME")]
    pub remediation_outcome: Option<OutcomeArg>,

    /// Confirm the admin consent prompt
    #[arg(long, conflicts_with = "cancel")]
    pub confirm: bool,

    /// Cancel the admin consent prompt
    #[arg(long)]
    pub cancel: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutcomeArg {
    Success,
    Cancelled,
    Failed,
}

impl From<OutcomeArg> for RemediationOutcome {
    fn from(arg: OutcomeArg) -> Self {
        match arg {
            OutcomeArg::Success => RemediationOutcome::Success,
            OutcomeArg::Cancelled => RemediationOutcome::Cancelled,
            OutcomeArg::Failed => RemediationOutcome::Failed,
        }
    }
}
