//! # Platform Adapters / 平台适配器
//!
//! Config-driven and logging implementations of the `dop-core` ports used by
//! the preflight binary.
//!
//! # Modules / 模块
//!
//! - `device_state` - Device facts read from the `[device]` config section
//! - `remediation` - Logs remediation tickets and their resume requests
//! - `consent_prompt` - Logs the confirmation step
//! - `events` - Logs state changes and aborts
//! - `executor` - Dry-run provisioning executor

pub mod consent_prompt;
pub mod device_state;
pub mod events;
pub mod executor;
pub mod remediation;

pub use consent_prompt::LoggingConsentPrompt;
pub use device_state::ConfiguredDeviceState;
pub use events::LoggingEventPort;
pub use executor::DryRunProvisioningExecutor;
pub use remediation::LoggingRemediationPort;
