//! Field keys shared by tag properties and direct extras.

pub const DEVICE_ADMIN_PACKAGE_NAME: &str = "provisioning.device_admin_package_name";
pub const DEVICE_ADMIN_COMPONENT_NAME: &str = "provisioning.device_admin_component_name";
pub const DEVICE_ADMIN_PACKAGE_DOWNLOAD_LOCATION: &str =
    "provisioning.device_admin_package_download_location";
pub const DEVICE_ADMIN_PACKAGE_CHECKSUM: &str = "provisioning.device_admin_package_checksum";

pub const SKIP_ENCRYPTION: &str = "provisioning.skip_encryption";
pub const LEAVE_ALL_SYSTEM_APPS_ENABLED: &str = "provisioning.leave_all_system_apps_enabled";

pub const LOCALE: &str = "provisioning.locale";
pub const TIME_ZONE: &str = "provisioning.time_zone";
pub const LOCAL_TIME: &str = "provisioning.local_time";

pub const WIFI_SSID: &str = "provisioning.wifi_ssid";
pub const WIFI_HIDDEN: &str = "provisioning.wifi_hidden";
pub const WIFI_SECURITY_TYPE: &str = "provisioning.wifi_security_type";
pub const WIFI_PASSWORD: &str = "provisioning.wifi_password";
pub const WIFI_PROXY_HOST: &str = "provisioning.wifi_proxy_host";
pub const WIFI_PROXY_PORT: &str = "provisioning.wifi_proxy_port";
pub const WIFI_PROXY_BYPASS: &str = "provisioning.wifi_proxy_bypass";
pub const WIFI_PAC_URL: &str = "provisioning.wifi_pac_url";

/// Keys whose values never reach the logs.
pub const SECRET_KEYS: &[&str] = &[WIFI_PASSWORD];

/// Direct extras: an object of string values.
/// Tag properties: every key under this prefix followed by a dot.
pub const ADMIN_EXTRAS: &str = "provisioning.admin_extras";

/// Internal: carried by resume requests so a re-delivered attempt keeps its
/// discovery origin. Only the legacy parser reads it.
pub const STARTED_BY_DISCOVERY: &str = "provisioning.started_by_discovery";
