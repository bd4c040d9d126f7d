//! NMS inventory models
//!
//! Field names follow the NMS data model (camelCase, and the space-separated
//! keys of interface references). Every device attribute is optional: the
//! NMS omits what discovery has not learned yet.

use serde::{Deserialize, Serialize};

/// Device as reported by the NMS device reader
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NmsDevice {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "mgmtIP", default)]
    pub mgmt_ip: Option<String>,
    #[serde(rename = "mgmtIntf", default)]
    pub mgmt_intf: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(rename = "subTypeName", default)]
    pub sub_type_name: Option<String>,
    #[serde(rename = "mainTypeName", default)]
    pub main_type_name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// Software version
    #[serde(default)]
    pub ver: Option<String>,
    /// Raw serial number
    #[serde(default)]
    pub sn: Option<String>,
}

/// Reference to an interface returned by the interface enumerator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceRef {
    #[serde(rename = "interface id")]
    pub id: String,
    #[serde(rename = "interface type")]
    pub interface_type: String,
}

/// Interface detail returned by the interface reader
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NmsInterface {
    pub name: String,
    #[serde(default)]
    pub descr: Option<String>,
}

/// Row of the one-IP table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneIpEntry {
    #[serde(rename = "lanSegment", default)]
    pub lan_segment: Option<String>,
    #[serde(rename = "devName", default, skip_serializing_if = "Option::is_none")]
    pub dev_name: Option<String>,
    #[serde(rename = "interfaceName", default, skip_serializing_if = "Option::is_none")]
    pub interface_name: Option<String>,
}

/// Interface kind the sync enumerates (layer-3 interfaces)
pub const INTERFACE_KIND_L3: &str = "intfs";

/// Device property holding the free-text location
pub const LOCATION_PROPERTY: &str = "loc";
