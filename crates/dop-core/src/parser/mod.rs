//! Request parsing and caller authentication.
//!
//! Turns a [`ProvisioningRequest`] into [`ProvisioningParams`]. Three request
//! shapes are recognized; every other action is rejected.

mod error;
mod fields;

pub use error::{InvalidRequest, InvalidRequestKind};

use serde_json::{Map, Value};

use crate::params::{ComponentName, PackageDownloadInfo, ProvisioningParams, WifiInfo};
use crate::request::{keys, ProvisioningRequest, RequestAction, RequestPayload, PROVISIONING_MIME_TYPE};
use fields::{parse_properties, Fields, Strictness};

pub struct RequestParser;

impl RequestParser {
    /// Parses and, for self-asserting requests, authenticates `request`.
    pub fn parse(request: &ProvisioningRequest) -> Result<ProvisioningParams, InvalidRequest> {
        let params = match &request.action {
            RequestAction::NdefDiscovered => Self::parse_discovery(&request.payload)?,
            RequestAction::LegacyProvisionManagedDevice => Self::parse_legacy(&request.payload)?,
            RequestAction::ProvisionManagedDevice => {
                let params = Self::parse_minimal(&request.payload)?;
                Self::authenticate(&params, request.calling_principal.as_deref())?;
                params
            }
            RequestAction::Unknown(action) => return Err(InvalidRequest::unknown_action(action)),
        };

        if params.infer_device_admin_package_name().is_none() {
            return Err(InvalidRequest::missing_admin());
        }
        Ok(params)
    }

    fn parse_discovery(payload: &RequestPayload) -> Result<ProvisioningParams, InvalidRequest> {
        let RequestPayload::Discovery { records } = payload else {
            return Err(InvalidRequest::malformed(
                "discovery request carries no tag records",
            ));
        };
        let record = records
            .iter()
            .find(|record| record.mime_type == PROVISIONING_MIME_TYPE)
            .ok_or_else(|| {
                InvalidRequest::malformed(format!("no tag record of type {PROVISIONING_MIME_TYPE}"))
            })?;

        let props = parse_properties(&record.payload);
        let mut params = Self::read_full(&Fields::Properties(&props), Strictness::Strict)?;
        params.started_by_discovery = true;
        Ok(params)
    }

    fn parse_legacy(payload: &RequestPayload) -> Result<ProvisioningParams, InvalidRequest> {
        let extras = Self::extras(payload)?;
        let fields = Fields::Extras(extras);
        let mut params = Self::read_full(&fields, Strictness::Permissive)?;
        params.started_by_discovery = fields.flag(keys::STARTED_BY_DISCOVERY, Strictness::Permissive)?;
        Ok(params)
    }

    fn parse_minimal(payload: &RequestPayload) -> Result<ProvisioningParams, InvalidRequest> {
        let fields = Fields::Extras(Self::extras(payload)?);
        let strict = Strictness::Strict;
        Ok(ProvisioningParams {
            device_admin_package_name: fields.string(keys::DEVICE_ADMIN_PACKAGE_NAME, strict)?,
            device_admin_component_name: Self::component(&fields, strict)?,
            skip_encryption: fields.flag(keys::SKIP_ENCRYPTION, strict)?,
            leave_all_system_apps_enabled: fields.flag(keys::LEAVE_ALL_SYSTEM_APPS_ENABLED, strict)?,
            admin_extras: fields.admin_extras(strict)?,
            ..Default::default()
        })
    }

    /// The caller must be identifiable and must be the admin it names.
    fn authenticate(params: &ProvisioningParams, caller: Option<&str>) -> Result<(), InvalidRequest> {
        let caller = caller
            .filter(|caller| !caller.is_empty())
            .ok_or_else(InvalidRequest::caller_unknown)?;
        let admin = params
            .infer_device_admin_package_name()
            .ok_or_else(InvalidRequest::missing_admin)?;
        if caller != admin {
            return Err(InvalidRequest::permission_denied(caller, admin));
        }
        Ok(())
    }

    fn extras(payload: &RequestPayload) -> Result<&Map<String, Value>, InvalidRequest> {
        match payload {
            RequestPayload::Extras { extras } => Ok(extras),
            RequestPayload::Discovery { .. } => Err(InvalidRequest::malformed(
                "direct request carries tag records instead of extras",
            )),
        }
    }

    fn component(
        fields: &Fields<'_>,
        strictness: Strictness,
    ) -> Result<Option<ComponentName>, InvalidRequest> {
        let Some(flat) = fields.string(keys::DEVICE_ADMIN_COMPONENT_NAME, strictness)? else {
            return Ok(None);
        };
        match ComponentName::unflatten(&flat) {
            Some(component) => Ok(Some(component)),
            None if strictness == Strictness::Permissive => {
                tracing::warn!(component = %flat, "ignoring malformed admin component name");
                Ok(None)
            }
            None => Err(InvalidRequest::malformed(format!(
                "{}: {flat:?} is not of the form package/class",
                keys::DEVICE_ADMIN_COMPONENT_NAME
            ))),
        }
    }

    fn read_full(
        fields: &Fields<'_>,
        strictness: Strictness,
    ) -> Result<ProvisioningParams, InvalidRequest> {
        let download = fields
            .string(keys::DEVICE_ADMIN_PACKAGE_DOWNLOAD_LOCATION, strictness)?
            .map(|location| -> Result<_, InvalidRequest> {
                Ok(PackageDownloadInfo {
                    location,
                    checksum: fields.string(keys::DEVICE_ADMIN_PACKAGE_CHECKSUM, strictness)?,
                })
            })
            .transpose()?;

        let wifi = WifiInfo {
            ssid: fields.string(keys::WIFI_SSID, strictness)?,
            hidden: fields.flag(keys::WIFI_HIDDEN, strictness)?,
            security_type: fields.string(keys::WIFI_SECURITY_TYPE, strictness)?,
            password: fields.string(keys::WIFI_PASSWORD, strictness)?,
            proxy_host: fields.string(keys::WIFI_PROXY_HOST, strictness)?,
            proxy_port: fields.port(keys::WIFI_PROXY_PORT, strictness)?,
            proxy_bypass: fields.string(keys::WIFI_PROXY_BYPASS, strictness)?,
            pac_url: fields.string(keys::WIFI_PAC_URL, strictness)?,
        };

        Ok(ProvisioningParams {
            device_admin_package_name: fields.string(keys::DEVICE_ADMIN_PACKAGE_NAME, strictness)?,
            device_admin_component_name: Self::component(fields, strictness)?,
            device_admin_download: download,
            started_by_discovery: false,
            skip_encryption: fields.flag(keys::SKIP_ENCRYPTION, strictness)?,
            leave_all_system_apps_enabled: fields
                .flag(keys::LEAVE_ALL_SYSTEM_APPS_ENABLED, strictness)?,
            wifi,
            locale: fields.string(keys::LOCALE, strictness)?,
            time_zone: fields.string(keys::TIME_ZONE, strictness)?,
            local_time: fields.integer(keys::LOCAL_TIME, strictness)?,
            admin_extras: fields.admin_extras(strictness)?,
        })
    }
}

/// Serializes `params` into legacy extras, the inverse of the legacy parser.
///
/// Used to build resume requests that survive a restart.
pub fn extras_from_params(params: &ProvisioningParams) -> Map<String, Value> {
    let mut extras = Map::new();
    let mut put_str = |key: &str, value: Option<&str>| {
        if let Some(value) = value {
            extras.insert(key.to_string(), Value::String(value.to_string()));
        }
    };

    put_str(
        keys::DEVICE_ADMIN_PACKAGE_NAME,
        params.device_admin_package_name.as_deref(),
    );
    put_str(
        keys::DEVICE_ADMIN_COMPONENT_NAME,
        params
            .device_admin_component_name
            .as_ref()
            .map(ComponentName::flatten)
            .as_deref(),
    );
    if let Some(download) = &params.device_admin_download {
        put_str(
            keys::DEVICE_ADMIN_PACKAGE_DOWNLOAD_LOCATION,
            Some(download.location.as_str()),
        );
        put_str(keys::DEVICE_ADMIN_PACKAGE_CHECKSUM, download.checksum.as_deref());
    }
    put_str(keys::LOCALE, params.locale.as_deref());
    put_str(keys::TIME_ZONE, params.time_zone.as_deref());

    let wifi = &params.wifi;
    put_str(keys::WIFI_SSID, wifi.ssid.as_deref());
    put_str(keys::WIFI_SECURITY_TYPE, wifi.security_type.as_deref());
    put_str(keys::WIFI_PASSWORD, wifi.password.as_deref());
    put_str(keys::WIFI_PROXY_HOST, wifi.proxy_host.as_deref());
    put_str(keys::WIFI_PROXY_BYPASS, wifi.proxy_bypass.as_deref());
    put_str(keys::WIFI_PAC_URL, wifi.pac_url.as_deref());

    if let Some(port) = wifi.proxy_port {
        extras.insert(keys::WIFI_PROXY_PORT.to_string(), Value::from(port));
    }
    if let Some(local_time) = params.local_time {
        extras.insert(keys::LOCAL_TIME.to_string(), Value::from(local_time));
    }
    for (key, flag) in [
        (keys::WIFI_HIDDEN, wifi.hidden),
        (keys::SKIP_ENCRYPTION, params.skip_encryption),
        (
            keys::LEAVE_ALL_SYSTEM_APPS_ENABLED,
            params.leave_all_system_apps_enabled,
        ),
        (keys::STARTED_BY_DISCOVERY, params.started_by_discovery),
    ] {
        extras.insert(key.to_string(), Value::Bool(flag));
    }
    if !params.admin_extras.is_empty() {
        let admin_extras = params
            .admin_extras
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        extras.insert(keys::ADMIN_EXTRAS.to_string(), Value::Object(admin_extras));
    }
    extras
}
