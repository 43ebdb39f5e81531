//! Normalized provisioning parameters.
//!
//! Produced only by [`crate::parser::RequestParser`]; once constructed the
//! inferred admin identity is non-empty.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Fully qualified admin component (`package/class`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentName {
    pub package: String,
    pub class: String,
}

impl ComponentName {
    /// Parses `package/class`. A class starting with `.` is relative to the package.
    pub fn unflatten(flat: &str) -> Option<Self> {
        let (package, class) = flat.split_once('/')?;
        let package = package.trim();
        let class = class.trim();
        if package.is_empty() || class.is_empty() || class.contains('/') {
            return None;
        }
        let class = if class.starts_with('.') {
            format!("{package}{class}")
        } else {
            class.to_string()
        };
        Some(Self {
            package: package.to_string(),
            class,
        })
    }

    pub fn flatten(&self) -> String {
        format!("{}/{}", self.package, self.class)
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flatten())
    }
}

/// Where the executor may fetch the admin package from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDownloadInfo {
    pub location: String,
    pub checksum: Option<String>,
}

/// Wireless network the executor joins as part of provisioning.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiInfo {
    pub ssid: Option<String>,
    pub hidden: bool,
    pub security_type: Option<String>,
    pub password: Option<String>,
    pub proxy_host: Option<String>,
    pub proxy_port: Option<u16>,
    pub proxy_bypass: Option<String>,
    pub pac_url: Option<String>,
}

impl WifiInfo {
    /// True when a network was pre-specified by the request.
    pub fn has_ssid(&self) -> bool {
        self.ssid.as_deref().is_some_and(|ssid| !ssid.is_empty())
    }
}

impl fmt::Debug for WifiInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WifiInfo")
            .field("ssid", &self.ssid)
            .field("hidden", &self.hidden)
            .field("security_type", &self.security_type)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("proxy_host", &self.proxy_host)
            .field("proxy_port", &self.proxy_port)
            .field("proxy_bypass", &self.proxy_bypass)
            .field("pac_url", &self.pac_url)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningParams {
    pub device_admin_package_name: Option<String>,
    pub device_admin_component_name: Option<ComponentName>,
    pub device_admin_download: Option<PackageDownloadInfo>,
    /// The request came from a discovered tag.
    pub started_by_discovery: bool,
    pub skip_encryption: bool,
    pub leave_all_system_apps_enabled: bool,
    pub wifi: WifiInfo,
    pub locale: Option<String>,
    pub time_zone: Option<String>,
    /// Milliseconds since the epoch.
    pub local_time: Option<i64>,
    pub admin_extras: BTreeMap<String, String>,
}

impl ProvisioningParams {
    /// Package of the admin that will own the device.
    ///
    /// The component's package wins over the bare package name.
    pub fn infer_device_admin_package_name(&self) -> Option<&str> {
        self.device_admin_component_name
            .as_ref()
            .map(|component| component.package.as_str())
            .or(self.device_admin_package_name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unflatten_expands_relative_class() {
        let component = ComponentName::unflatten("com.example.dpc/.AdminReceiver").unwrap();
        assert_eq!(component.package, "com.example.dpc");
        assert_eq!(component.class, "com.example.dpc.AdminReceiver");
    }

    #[test]
    fn unflatten_rejects_malformed_names() {
        assert!(ComponentName::unflatten("com.example.dpc").is_none());
        assert!(ComponentName::unflatten("/Receiver").is_none());
        assert!(ComponentName::unflatten("com.example.dpc/").is_none());
        assert!(ComponentName::unflatten("a/b/c").is_none());
    }

    #[test]
    fn component_package_takes_precedence() {
        let params = ProvisioningParams {
            device_admin_package_name: Some("com.other".into()),
            device_admin_component_name: ComponentName::unflatten("com.example.dpc/.Admin"),
            ..Default::default()
        };
        assert_eq!(params.infer_device_admin_package_name(), Some("com.example.dpc"));
    }

    #[test]
    fn empty_package_name_is_not_an_identity() {
        let params = ProvisioningParams {
            device_admin_package_name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(params.infer_device_admin_package_name(), None);
    }

    #[test]
    fn wifi_debug_redacts_password() {
        let wifi = WifiInfo {
            ssid: Some("corp".into()),
            password: Some("hunter2".into()),
            ..Default::default()
        };
        let debug = format!("{wifi:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
