//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create the consent store / 创建确认记录存储
//! - ✅ Create the platform adapters / 创建平台适配器
//! - ✅ Inject all ports into the orchestrator / 将所有端口注入编排器
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! - Do not decide whether a precondition holds
//! - 不判断前置条件是否满足
//!
//! ❌ **No configuration validation / 禁止做配置验证**
//! - Config already loaded in config.rs
//! - 配置已在 config.rs 加载
//!
//! ## Architecture Principle / 架构原则
//!
//! > **This is the only place allowed to depend on dop-infra + adapters + dop-app simultaneously.**
//! > **这是唯一允许同时依赖 dop-infra、适配器和 dop-app 的地方。**

use std::path::PathBuf;
use std::sync::Arc;

use dop_app::{PreProvisioningOrchestrator, PreProvisioningPorts};
use dop_core::config::PreflightConfig;
use dop_infra::consent_store::DEFAULT_CONSENT_FILE;
use dop_infra::FileConsentRepository;
use tracing::debug;

use crate::adapters::{
    ConfiguredDeviceState, DryRunProvisioningExecutor, LoggingConsentPrompt, LoggingEventPort,
    LoggingRemediationPort,
};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Data directory unavailable: {0}")]
    DataDir(String),

    #[error("Device state adapter initialization failed: {0}")]
    DeviceState(String),
}

/// Resolve the consent record path.
///
/// An empty path in config falls back to the platform data directory.
fn resolve_consent_path(config: &PreflightConfig) -> WiringResult<PathBuf> {
    if !config.consent_path.as_os_str().is_empty() {
        return Ok(config.consent_path.clone());
    }

    let data_dir =
        dop_infra::fs::app_data_dir().map_err(|e| WiringError::DataDir(e.to_string()))?;
    Ok(data_dir.join(DEFAULT_CONSENT_FILE))
}

/// Assemble the orchestrator from config.
/// 根据配置组装编排器
pub fn build_orchestrator(config: &PreflightConfig) -> WiringResult<PreProvisioningOrchestrator> {
    let consent_path = resolve_consent_path(config)?;
    debug!(path = %consent_path.display(), "consent record location");

    let device_state = ConfiguredDeviceState::from_config(config)
        .map_err(|e| WiringError::DeviceState(e.to_string()))?;
    let consent_store = Arc::new(FileConsentRepository::new(consent_path));

    let ports = PreProvisioningPorts {
        device_state: Arc::new(device_state),
        remediation: Arc::new(LoggingRemediationPort),
        consent_prompt: Arc::new(LoggingConsentPrompt),
        consent_store,
        executor: Arc::new(DryRunProvisioningExecutor),
        event_port: Arc::new(LoggingEventPort),
    };

    Ok(PreProvisioningOrchestrator::new(ports))
}
