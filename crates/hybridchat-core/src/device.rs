//! Device identification

use serde::{Deserialize, Serialize};

use hybridchat_permissions::{Capability, PermissionGate};

use crate::Result;

/// First Android API level (8.0) whose telephony service exposes the IMEI query
pub const HARDWARE_ID_MIN_API_LEVEL: u32 = 26;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    pub model: String,
    pub os_version: String,
    pub manufacturer: String,
    /// Platform API level, `None` on hosts that do not version their APIs
    pub api_level: Option<u32>,
}

impl DeviceProfile {
    pub fn supports_hardware_id(&self) -> bool {
        self.api_level
            .map_or(true, |level| level >= HARDWARE_ID_MIN_API_LEVEL)
    }
}

pub trait DeviceInfoProvider: Send + Sync {
    fn profile(&self) -> Result<DeviceProfile>;

    /// Only called once phone-state access is granted and supported
    fn hardware_id(&self) -> Result<Option<String>>;
}

/// What `getDeviceInfo` hands to the page. Key names are part of the page contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfoSnapshot {
    #[serde(rename = "deviceModel")]
    pub model: String,
    #[serde(rename = "androidVersion")]
    pub os_version: String,
    pub manufacturer: String,
    #[serde(rename = "imei", default, skip_serializing_if = "Option::is_none")]
    pub hardware_id: Option<String>,
}

impl DeviceInfoSnapshot {
    /// Build a fresh snapshot. The hardware id is left out unless phone
    /// state is granted right now and the OS can answer the query.
    pub fn collect(device: &dyn DeviceInfoProvider, gate: &PermissionGate) -> Result<Self> {
        let profile = device.profile()?;

        let hardware_id = if gate.check_granted(Capability::PhoneState)
            && profile.supports_hardware_id()
        {
            device.hardware_id()?
        } else {
            None
        };

        Ok(Self {
            model: profile.model,
            os_version: profile.os_version,
            manufacturer: profile.manufacturer,
            hardware_id,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Device facts for desktop hosts, read from the running system
pub struct SystemDevice;

impl DeviceInfoProvider for SystemDevice {
    fn profile(&self) -> Result<DeviceProfile> {
        Ok(DeviceProfile {
            model: format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH),
            os_version: os_version().unwrap_or_else(|| std::env::consts::OS.to_string()),
            manufacturer: "unknown".to_string(),
            api_level: None,
        })
    }

    fn hardware_id(&self) -> Result<Option<String>> {
        #[cfg(target_os = "linux")]
        {
            match std::fs::read_to_string("/etc/machine-id") {
                Ok(id) => {
                    let id = id.trim();
                    Ok((!id.is_empty()).then(|| id.to_string()))
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(crate::CoreError::Device(format!("machine-id: {}", e))),
            }
        }
        #[cfg(not(target_os = "linux"))]
        {
            Ok(None)
        }
    }
}

fn os_version() -> Option<String> {
    let release = std::fs::read_to_string("/etc/os-release").ok()?;
    release.lines().find_map(|line| {
        line.strip_prefix("VERSION_ID=")
            .map(|v| v.trim_matches('"').to_string())
    })
}
