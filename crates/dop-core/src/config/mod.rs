//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic or policies / 禁止任何业务逻辑或策略**
//! ❌ **No validation logic / 禁止验证逻辑**
//!
//! Missing values map to empty/false. Interpreting them is the adapters' job.

use std::path::PathBuf;

/// Device facts for the config-driven platform adapter.
/// 由配置描述的设备状态（供配置驱动的平台适配器使用）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFactsConfig {
    /// `primary` or `secondary`; anything else is left to the adapter.
    pub caller_class: String,
    pub device_provisioned: bool,
    pub user_setup_complete: bool,
    /// Absent means the platform has no reset protection.
    pub frp_data_block_size: Option<u64>,
    pub device_encrypted: bool,
    pub network_connected: bool,
}

/// Preflight configuration DTO (pure data, no logic)
/// 预检配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightConfig {
    /// Default tracing filter when `RUST_LOG` is unset (may be empty).
    pub log_level: String,

    /// Consent record file (path info only, no existence check)
    /// 确认记录文件路径（仅路径信息，不检查文件是否存在）
    pub consent_path: PathBuf,

    /// System policy waiving the encryption requirement.
    pub encryption_exempt: bool,

    pub device: DeviceFactsConfig,
}

impl PreflightConfig {
    /// Create PreflightConfig from TOML value
    /// 从 TOML 值创建 PreflightConfig
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let section = |name: &str| toml_value.get(name);
        let string = |section_name: &str, key: &str| {
            section(section_name)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let flag = |section_name: &str, key: &str| {
            section(section_name)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
        };

        Ok(Self {
            log_level: string("general", "log_level"),
            consent_path: PathBuf::from(string("storage", "consent_path")),
            encryption_exempt: flag("policy", "encryption_exempt"),
            device: DeviceFactsConfig {
                caller_class: string("device", "caller_class"),
                device_provisioned: flag("device", "device_provisioned"),
                user_setup_complete: flag("device", "user_setup_complete"),
                frp_data_block_size: section("device")
                    .and_then(|d| d.get("frp_data_block_size"))
                    .and_then(|v| v.as_integer())
                    .and_then(|v| u64::try_from(v).ok()),
                device_encrypted: flag("device", "device_encrypted"),
                network_connected: flag("device", "network_connected"),
            },
        })
    }

    /// Create empty PreflightConfig (all empty/default values)
    /// 创建空的 PreflightConfig（所有字段为空/默认值）
    pub fn empty() -> Self {
        Self {
            log_level: String::new(),
            consent_path: PathBuf::new(),
            encryption_exempt: false,
            device: DeviceFactsConfig::default(),
        }
    }

    /// Create PreflightConfig with paths under `data_dir`
    /// 使用 `data_dir` 下的默认路径创建 PreflightConfig
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            consent_path: data_dir.join(".consent_record"),
            ..Self::empty()
        }
    }
}
