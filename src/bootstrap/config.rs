//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Parse TOML into PreflightConfig DTO / 将 TOML 解析为 PreflightConfig DTO
//! - ✅ Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No default value logic / 禁止默认值逻辑**

use anyhow::Context;
use dop_core::config::PreflightConfig;
use std::path::PathBuf;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// Missing sections map to empty values; those are facts, not errors.
/// 缺失的部分导致空值（事实，而非错误）。
///
/// # Errors / 错误
///
/// - File cannot be read (I/O error) / 无法读取文件
/// - Content is not valid TOML (parse error) / 内容不是有效的 TOML
pub fn load_config(config_path: PathBuf) -> anyhow::Result<PreflightConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    PreflightConfig::from_toml(&toml_value)
}
