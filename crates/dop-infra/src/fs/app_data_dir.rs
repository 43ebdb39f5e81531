use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the preflight data root directory.
///
/// 获取预检数据根目录。
///
/// # Platform-specific Paths / 平台特定路径
/// - macOS: ~/Library/Application Support/DopPreflight
/// - Windows: %APPDATA%\DopPreflight
/// - Linux: $XDG_DATA_HOME/dop-preflight or ~/.local/share/dop-preflight
///
/// # Behavior / 行为
/// - This function does not automatically create directories.
/// - 此函数不自动创建目录。
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir =
        get_platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join(app_dir_name()))
}

fn app_dir_name() -> &'static str {
    if cfg!(target_os = "linux") {
        "dop-preflight"
    } else {
        "DopPreflight"
    }
}

/// 根据平台获取基础数据目录
fn get_platform_data_dir() -> Result<PathBuf> {
    // 优先使用 XDG_DATA_HOME
    #[cfg(target_os = "linux")]
    if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
        return Ok(PathBuf::from(xdg_data_home));
    }

    dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get platform data directory"))
}
