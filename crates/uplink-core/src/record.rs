//! Output record assembly.

use serde::{Deserialize, Serialize};

use crate::config::device;
use crate::error::{DecodeError, Result};
use crate::translate::Telemetry;

/// Fixed identity of the gateway model reporting the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub name: String,
    pub device_type: String,
}

impl DeviceDescriptor {
    pub fn new(name: impl Into<String>, device_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            device_type: device_type.into(),
        }
    }
}

impl Default for DeviceDescriptor {
    fn default() -> Self {
        Self::new(device::NAME, device::TYPE)
    }
}

/// Device attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attributes {
    /// Serial number captured from the topic; unset when no rule matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sn: Option<String>,
}

/// Normalized result of decoding one uplink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub device_name: String,
    pub device_type: String,
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telemetry: Option<Telemetry>,
}

impl OutputRecord {
    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| DecodeError::Serialization(e.to_string()))
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| DecodeError::Serialization(e.to_string()))
    }

    pub fn serial(&self) -> Option<&str> {
        self.attributes.sn.as_deref()
    }
}

/// Combine the descriptor with whatever routing and translation produced.
/// Never fails; an unmatched topic simply leaves `sn` and `telemetry` unset.
pub fn assemble(
    descriptor: &DeviceDescriptor,
    serial: Option<String>,
    telemetry: Option<Telemetry>,
) -> OutputRecord {
    OutputRecord {
        device_name: descriptor.name.clone(),
        device_type: descriptor.device_type.clone(),
        attributes: Attributes { sn: serial },
        telemetry,
    }
}
