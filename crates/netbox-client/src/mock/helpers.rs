//! Helper functions for filter matching and nested NetBox model types

use crate::models::*;

/// Helper functions for creating nested types in mock implementations
pub struct Helpers {
    base_url: String,
}

impl Helpers {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    /// API URL of an object, e.g. `{base}/api/dcim/sites/3/`
    pub fn object_url(&self, endpoint: &str, id: u64) -> String {
        format!("{}/api/{}/{}/", self.base_url, endpoint, id)
    }

    /// Helper to create NestedManufacturer
    pub fn nested_manufacturer(&self, mfg: &Manufacturer) -> NestedManufacturer {
        NestedManufacturer {
            id: mfg.id,
            url: mfg.url.clone(),
            display: mfg.name.clone(),
            name: mfg.name.clone(),
            slug: mfg.slug.clone(),
        }
    }

    /// Helper to create NestedDeviceType
    pub fn nested_device_type(&self, device_type: &DeviceType) -> NestedDeviceType {
        NestedDeviceType {
            id: device_type.id,
            url: device_type.url.clone(),
            display: device_type.model.clone(),
            model: device_type.model.clone(),
            slug: device_type.slug.clone(),
        }
    }

    /// Helper to create NestedDeviceRole
    pub fn nested_device_role(&self, role: &DeviceRole) -> NestedDeviceRole {
        NestedDeviceRole {
            id: role.id,
            url: role.url.clone(),
            display: role.name.clone(),
            name: role.name.clone(),
            slug: role.slug.clone(),
        }
    }

    /// Helper to create NestedSite
    pub fn nested_site(&self, site: &Site) -> NestedSite {
        NestedSite {
            id: site.id,
            url: site.url.clone(),
            display: site.name.clone(),
            name: site.name.clone(),
            slug: site.slug.clone(),
        }
    }

    /// Helper to create NestedPlatform
    pub fn nested_platform(&self, platform: &Platform) -> NestedPlatform {
        NestedPlatform {
            id: platform.id,
            url: platform.url.clone(),
            display: platform.name.clone(),
            name: platform.name.clone(),
            slug: platform.slug.clone(),
        }
    }

    /// Helper to create NestedDevice
    pub fn nested_device(&self, device: &Device) -> NestedDevice {
        NestedDevice {
            id: device.id,
            url: device.url.clone(),
            display: device.display.clone(),
            name: device.name.clone(),
        }
    }

    /// Helper to create NestedIPAddress
    pub fn nested_ip_address(&self, ip: &IPAddress) -> NestedIPAddress {
        NestedIPAddress {
            id: ip.id,
            url: ip.url.clone(),
            display: ip.address.clone(),
            address: ip.address.clone(),
        }
    }
}

/// True when every filter pair matches the value `lookup` returns for its key.
///
/// Unknown keys never match, so a typo in a filter surfaces as "not found".
pub fn matches_filters<F>(filters: &[(&str, &str)], lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    filters
        .iter()
        .all(|&(key, value)| lookup(key).is_some_and(|actual| actual == value))
}
