//! Field normalization
//!
//! Turns a raw NMS device into the fully-resolved values every later stage
//! works with. A device that lacks any required attribute never gets past
//! this point.

use nms_source::NmsDevice;
use std::fmt;

/// Human-readable name with the slug NetBox keys it by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Named {
    /// Name as the NMS reports it
    pub name: String,
    /// Uniqueness key in NetBox
    pub slug: String,
}

impl Named {
    fn new(name: &str) -> Self {
        Self { name: name.to_string(), slug: slug(name) }
    }

    fn version(name: &str) -> Self {
        Self { name: name.to_string(), slug: version_slug(name) }
    }
}

/// Device with every required attribute present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDevice {
    /// Device name, the key NetBox devices are matched by
    pub name: String,
    /// Bare management address, no mask
    pub mgmt_ip: String,
    /// Name of the management interface
    pub mgmt_intf: String,
    /// Manufacturer
    pub vendor: Named,
    /// NMS sub-type name
    pub sub_type: Named,
    /// Device role, from the NMS main type
    pub role: Named,
    /// Hardware model
    pub model: Named,
    /// NMS site, or the default site
    pub site: Named,
    /// Software version; names the platform
    pub version: Option<Named>,
    /// Raw serial; see `serial::normalize_serial`
    pub serial: Option<String>,
    /// `loc` property
    pub location: Option<String>,
}

/// Required attributes a device was missing, in NMS field names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields(pub Vec<&'static str>);

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing required fields: {}", self.0.join(", "))
    }
}

/// Slug NetBox keys dependent objects by: spaces become underscores
pub fn slug(name: &str) -> String {
    name.replace(' ', "_")
}

/// Slug for software versions, which also carry dots and parentheses
pub fn version_slug(version: &str) -> String {
    version
        .chars()
        .map(|c| match c {
            ' ' | '.' => '_',
            '(' | ')' => '-',
            other => other,
        })
        .collect()
}

/// Blank strings count as absent
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validate and canonicalize one device.
///
/// `site_name` is what the NMS reports for the device (possibly empty);
/// `default_site` replaces it when empty. All missing required fields are
/// reported together.
pub fn normalize(
    device: &NmsDevice,
    site_name: &str,
    default_site: &str,
    location: Option<&str>,
) -> Result<NormalizedDevice, MissingFields> {
    let site = present(Some(site_name)).or_else(|| present(Some(default_site)));

    let mut missing = Vec::new();
    let mut require = |field: &'static str, value: Option<&str>| {
        let value = present(value);
        if value.is_none() {
            missing.push(field);
        }
        value.unwrap_or_default().to_string()
    };

    let name = require("name", device.name.as_deref());
    let mgmt_ip = require("mgmtIP", device.mgmt_ip.as_deref());
    let mgmt_intf = require("mgmtIntf", device.mgmt_intf.as_deref());
    let vendor = require("vendor", device.vendor.as_deref());
    let sub_type = require("subTypeName", device.sub_type_name.as_deref());
    let site = require("site", site);
    let role = require("mainTypeName", device.main_type_name.as_deref());
    let model = require("model", device.model.as_deref());

    if !missing.is_empty() {
        return Err(MissingFields(missing));
    }

    Ok(NormalizedDevice {
        name,
        mgmt_ip,
        mgmt_intf,
        vendor: Named::new(&vendor),
        sub_type: Named::new(&sub_type),
        role: Named::new(&role),
        model: Named::new(&model),
        site: Named::new(&site),
        version: present(device.ver.as_deref()).map(Named::version),
        serial: present(device.sn.as_deref()).map(str::to_string),
        location: present(location).map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sw1() -> NmsDevice {
        NmsDevice {
            name: Some("sw1".to_string()),
            mgmt_ip: Some("10.0.0.5".to_string()),
            mgmt_intf: Some("mgmt0".to_string()),
            vendor: Some("Cisco".to_string()),
            sub_type_name: Some("Switch".to_string()),
            main_type_name: Some("L2 Switch".to_string()),
            model: Some("C9300".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_slug_replaces_spaces() {
        assert_eq!(slug("L2 Switch"), "L2_Switch");
        assert_eq!(slug("Core  Data Center"), "Core__Data_Center");
        assert_eq!(slug("Cisco"), "Cisco");
    }

    #[test]
    fn test_version_slug_replaces_punctuation() {
        assert_eq!(version_slug("15.2(4)E10"), "15_2-4-E10");
        assert_eq!(version_slug("IOS XE 17.3.1"), "IOS_XE_17_3_1");
    }

    #[test]
    fn test_empty_site_takes_default() {
        let device = normalize(&sw1(), "", "HQ", None).unwrap();
        assert_eq!(device.site, Named { name: "HQ".to_string(), slug: "HQ".to_string() });
        assert_eq!(device.role.slug, "L2_Switch");

        let device = normalize(&sw1(), "Branch 7", "HQ", None).unwrap();
        assert_eq!(device.site.slug, "Branch_7");
    }

    #[test]
    fn test_optional_fields_resolve_to_none() {
        let mut raw = sw1();
        raw.ver = Some("  ".to_string());
        let device = normalize(&raw, "", "HQ", Some("")).unwrap();
        assert_eq!(device.version, None);
        assert_eq!(device.serial, None);
        assert_eq!(device.location, None);
    }

    #[test]
    fn test_all_missing_fields_reported_together() {
        let mut raw = sw1();
        raw.mgmt_intf = None;
        raw.vendor = Some(String::new());
        let err = normalize(&raw, "", "", None).unwrap_err();
        assert_eq!(err, MissingFields(vec!["mgmtIntf", "vendor", "site"]));
        assert_eq!(err.to_string(), "missing required fields: mgmtIntf, vendor, site");
    }
}
