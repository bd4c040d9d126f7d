//! NetBox API models
//!
//! These models match the subset of the NetBox REST API serializers the
//! inventory sync touches: device roles, manufacturers, device types,
//! platforms, sites, devices, interfaces and IP addresses.
//!
//! Response models default every non-identity field so that older and newer
//! NetBox releases (which add and rename fields) both deserialize.

use serde::{Deserialize, Serialize};

/// Device role model (`/api/dcim/device-roles/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRole {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

/// Manufacturer model (`/api/dcim/manufacturers/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

/// Device type model (`/api/dcim/device-types/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceType {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub manufacturer: NestedManufacturer,
    pub model: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

/// Platform model (`/api/dcim/platforms/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub manufacturer: Option<NestedManufacturer>,
    #[serde(default)]
    pub description: String,
}

/// Site model (`/api/dcim/sites/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub status: Option<ChoiceValue>,
    #[serde(default)]
    pub description: String,
}

/// Device model (`/api/dcim/devices/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: Option<String>,
    pub device_type: NestedDeviceType,
    /// NetBox < 4.0 calls this `device_role`
    #[serde(alias = "device_role")]
    pub role: NestedDeviceRole,
    pub site: NestedSite,
    #[serde(default)]
    pub platform: Option<NestedPlatform>,
    #[serde(default)]
    pub serial: String,
    #[serde(default)]
    pub status: Option<ChoiceValue>,
    #[serde(default)]
    pub primary_ip4: Option<NestedIPAddress>,
    #[serde(default)]
    pub description: String,
}

/// Interface model (`/api/dcim/interfaces/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interface {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub device: NestedDevice,
    pub name: String,
    #[serde(rename = "type", default)]
    pub interface_type: Option<ChoiceValue>,
    #[serde(default)]
    pub description: String,
}

/// IP Address model matching NetBox IPAddressSerializer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IPAddress {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub family: Option<ChoiceValue>,
    pub address: String, // e.g., "192.168.1.1/24"
    #[serde(default)]
    pub status: Option<ChoiceValue>,
    #[serde(default)]
    pub assigned_object_type: Option<String>,
    #[serde(default)]
    pub assigned_object_id: Option<u64>,
    #[serde(default)]
    pub assigned_object: Option<serde_json::Value>,
    #[serde(default)]
    pub description: String,
}

impl IPAddress {
    /// Host part of the address, without the prefix length
    pub fn host(&self) -> &str {
        self.address.split('/').next().unwrap_or(&self.address)
    }
}

/// `{value, label}` pair NetBox uses for choice fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceValue {
    pub value: String,
    #[serde(default)]
    pub label: String,
}

impl ChoiceValue {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            label: value.to_string(),
        }
    }
}

// Nested serializers (simplified versions for references)

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedManufacturer {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedDeviceType {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedDeviceRole {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedPlatform {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedSite {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedDevice {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedIPAddress {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub address: String,
}

/// Request body for creating a device
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewDevice {
    pub name: String,
    pub device_type: u64,
    pub role: u64,
    pub site: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
}

/// Partial update for a device; only the populated fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DevicePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_ip4: Option<u64>,
}

impl DevicePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial update for an IP address; only the populated fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IPAddressPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_object_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_object_id: Option<u64>,
}

impl IPAddressPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Content type NetBox uses for interface assignments
pub const INTERFACE_OBJECT_TYPE: &str = "dcim.interface";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_patch_skips_unset_fields() {
        let patch = DevicePatch {
            serial: Some("FOC123".to_string()),
            ..Default::default()
        };
        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, serde_json::json!({ "serial": "FOC123" }));
        assert!(!patch.is_empty());
        assert!(DevicePatch::default().is_empty());
    }

    #[test]
    fn test_device_accepts_legacy_device_role_field() {
        let body = serde_json::json!({
            "id": 7,
            "name": "sw1",
            "device_type": { "id": 1, "model": "C9300", "slug": "C9300" },
            "device_role": { "id": 2, "name": "L2 Switch", "slug": "L2_Switch" },
            "site": { "id": 3, "name": "HQ", "slug": "HQ" },
            "primary_ip4": null
        });
        let device: Device = serde_json::from_value(body).unwrap();
        assert_eq!(device.role.id, 2);
        assert!(device.primary_ip4.is_none());
        assert!(device.serial.is_empty());
    }

    #[test]
    fn test_ip_address_host() {
        let ip: IPAddress = serde_json::from_value(serde_json::json!({
            "id": 1,
            "address": "10.0.0.5/24"
        }))
        .unwrap();
        assert_eq!(ip.host(), "10.0.0.5");
    }
}
