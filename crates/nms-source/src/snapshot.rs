//! JSON snapshot of NMS inventory
//!
//! A snapshot is an export of everything the sync reads from the NMS:
//!
//! ```json
//! {
//!   "device_groups": { "Core": ["dev-1"] },
//!   "devices": { "dev-1": { "name": "sw1", "mgmtIP": "10.0.0.5", "mgmtIntf": "mgmt0" } },
//!   "sites": { "sw1": "HQ" },
//!   "properties": { "sw1": { "loc": "Rack 4" } },
//!   "interfaces": { "sw1": { "intfs": [
//!     { "interface id": "if-1", "interface type": "intfs", "name": "mgmt0", "descr": "OOB" }
//!   ] } },
//!   "one_ip_table": { "10.0.0.5": [ { "lanSegment": "10.0.0.0/24" } ] }
//! }
//! ```

use crate::error::SourceError;
use crate::models::*;
use crate::nms_trait::NmsSource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Interface entry of a snapshot: reference and detail in one object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotInterface {
    #[serde(flatten)]
    pub reference: InterfaceRef,
    #[serde(flatten)]
    pub detail: NmsInterface,
}

/// In-memory NMS inventory loaded from a JSON snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotSource {
    /// Device group -> device ids, in NMS order
    #[serde(default)]
    pub device_groups: HashMap<String, Vec<String>>,
    /// Device id -> device
    #[serde(default)]
    pub devices: HashMap<String, NmsDevice>,
    /// Device name -> site name
    #[serde(default)]
    pub sites: HashMap<String, String>,
    /// Device name -> property key -> value
    #[serde(default)]
    pub properties: HashMap<String, HashMap<String, String>>,
    /// Device name -> interface kind -> interfaces
    #[serde(default)]
    pub interfaces: HashMap<String, HashMap<String, Vec<SnapshotInterface>>>,
    /// Address -> one-IP-table rows
    #[serde(default)]
    pub one_ip_table: HashMap<String, Vec<OneIpEntry>>,
}

impl SnapshotSource {
    /// Parse a snapshot document
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a snapshot file
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        debug!("Loading NMS snapshot from {}", path.display());
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }

    /// Add a device and append it to a device group
    pub fn with_device(mut self, device_group: &str, device_id: &str, device: NmsDevice) -> Self {
        self.device_groups
            .entry(device_group.to_string())
            .or_default()
            .push(device_id.to_string());
        self.devices.insert(device_id.to_string(), device);
        self
    }

    /// File a device under a site
    pub fn with_site(mut self, device_name: &str, site: &str) -> Self {
        self.sites.insert(device_name.to_string(), site.to_string());
        self
    }

    /// Set a device property
    pub fn with_property(mut self, device_name: &str, key: &str, value: &str) -> Self {
        self.properties
            .entry(device_name.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Add an interface of kind `intfs` to a device
    pub fn with_interface(mut self, device_name: &str, interface_id: &str, name: &str, descr: Option<&str>) -> Self {
        self.interfaces
            .entry(device_name.to_string())
            .or_default()
            .entry(INTERFACE_KIND_L3.to_string())
            .or_default()
            .push(SnapshotInterface {
                reference: InterfaceRef {
                    id: interface_id.to_string(),
                    interface_type: INTERFACE_KIND_L3.to_string(),
                },
                detail: NmsInterface {
                    name: name.to_string(),
                    descr: descr.map(str::to_string),
                },
            });
        self
    }

    /// Add a one-IP-table row for an address
    pub fn with_one_ip(mut self, ip: &str, lan_segment: &str) -> Self {
        self.one_ip_table
            .entry(ip.to_string())
            .or_default()
            .push(OneIpEntry {
                lan_segment: Some(lan_segment.to_string()),
                ..Default::default()
            });
        self
    }

    /// Replace a device's record in place, keeping its group membership
    pub fn set_device(&mut self, device_id: &str, device: NmsDevice) {
        self.devices.insert(device_id.to_string(), device);
    }
}

#[async_trait::async_trait]
impl NmsSource for SnapshotSource {
    async fn device_ids(&self, device_group: &str) -> Result<Vec<String>, SourceError> {
        self.device_groups
            .get(device_group)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("Device group {}", device_group)))
    }

    async fn device(&self, device_id: &str) -> Result<NmsDevice, SourceError> {
        self.devices
            .get(device_id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("Device {}", device_id)))
    }

    async fn site_name(&self, device_name: &str) -> Result<String, SourceError> {
        Ok(self.sites.get(device_name).cloned().unwrap_or_default())
    }

    async fn device_property(&self, device_name: &str, key: &str) -> Result<Option<String>, SourceError> {
        Ok(self
            .properties
            .get(device_name)
            .and_then(|props| props.get(key))
            .cloned())
    }

    async fn interface_refs(&self, device_name: &str, kind: &str) -> Result<Vec<InterfaceRef>, SourceError> {
        Ok(self
            .interfaces
            .get(device_name)
            .and_then(|kinds| kinds.get(kind))
            .map(|interfaces| interfaces.iter().map(|i| i.reference.clone()).collect())
            .unwrap_or_default())
    }

    async fn interface(&self, interface: &InterfaceRef) -> Result<NmsInterface, SourceError> {
        self.interfaces
            .values()
            .flat_map(|kinds| kinds.values())
            .flatten()
            .find(|i| i.reference == *interface)
            .map(|i| i.detail.clone())
            .ok_or_else(|| SourceError::NotFound(format!("Interface {}", interface.id)))
    }

    async fn one_ip_entries(&self, ip: &str) -> Result<Vec<OneIpEntry>, SourceError> {
        Ok(self.one_ip_table.get(ip).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "device_groups": { "Core": ["dev-2", "dev-1"] },
        "devices": {
            "dev-1": { "name": "sw1", "mgmtIP": "10.0.0.5", "mgmtIntf": "mgmt0", "vendor": "Cisco",
                       "subTypeName": "Switch", "mainTypeName": "L2 Switch", "model": "C9300" },
            "dev-2": { "name": "fw1", "mgmtIP": "10.0.1.1" }
        },
        "sites": { "sw1": "HQ" },
        "properties": { "sw1": { "loc": "Rack 4" } },
        "interfaces": { "sw1": { "intfs": [
            { "interface id": "if-1", "interface type": "intfs", "name": "Gi1/0/1" },
            { "interface id": "if-2", "interface type": "intfs", "name": "mgmt0", "descr": "OOB" }
        ] } },
        "one_ip_table": { "10.0.0.5": [ { "lanSegment": "10.0.0.0/24", "devName": "sw1" } ] }
    }"#;

    #[tokio::test]
    async fn test_snapshot_preserves_group_order() {
        let source = SnapshotSource::from_json(SNAPSHOT).unwrap();
        assert_eq!(source.device_ids("Core").await.unwrap(), vec!["dev-2", "dev-1"]);
        assert!(matches!(source.device_ids("Edge").await, Err(SourceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_snapshot_device_fields() {
        let source = SnapshotSource::from_json(SNAPSHOT).unwrap();
        let sw1 = source.device("dev-1").await.unwrap();
        assert_eq!(sw1.mgmt_intf.as_deref(), Some("mgmt0"));
        assert_eq!(sw1.main_type_name.as_deref(), Some("L2 Switch"));
        assert_eq!(sw1.sn, None);

        let fw1 = source.device("dev-2").await.unwrap();
        assert_eq!(fw1.vendor, None);
    }

    #[tokio::test]
    async fn test_snapshot_site_and_property_default_to_empty() {
        let source = SnapshotSource::from_json(SNAPSHOT).unwrap();
        assert_eq!(source.site_name("sw1").await.unwrap(), "HQ");
        assert_eq!(source.site_name("fw1").await.unwrap(), "");
        assert_eq!(
            source.device_property("sw1", LOCATION_PROPERTY).await.unwrap().as_deref(),
            Some("Rack 4")
        );
        assert_eq!(source.device_property("fw1", LOCATION_PROPERTY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_snapshot_interfaces() {
        let source = SnapshotSource::from_json(SNAPSHOT).unwrap();
        let refs = source.interface_refs("sw1", INTERFACE_KIND_L3).await.unwrap();
        assert_eq!(refs.len(), 2);

        let mgmt = source.interface(&refs[1]).await.unwrap();
        assert_eq!(mgmt.name, "mgmt0");
        assert_eq!(mgmt.descr.as_deref(), Some("OOB"));
        assert!(source.interface_refs("fw1", INTERFACE_KIND_L3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_one_ip_table() {
        let source = SnapshotSource::from_json(SNAPSHOT).unwrap();
        let rows = source.one_ip_entries("10.0.0.5").await.unwrap();
        assert_eq!(rows[0].lan_segment.as_deref(), Some("10.0.0.0/24"));
        assert!(source.one_ip_entries("10.9.9.9").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_builder_matches_parsed_shape() {
        let source = SnapshotSource::default()
            .with_device("Core", "dev-1", NmsDevice { name: Some("sw1".to_string()), ..Default::default() })
            .with_interface("sw1", "if-2", "mgmt0", Some("OOB"))
            .with_one_ip("10.0.0.5", "10.0.0.0/24");

        assert_eq!(source.device_ids("Core").await.unwrap(), vec!["dev-1"]);
        let refs = source.interface_refs("sw1", INTERFACE_KIND_L3).await.unwrap();
        assert_eq!(source.interface(&refs[0]).await.unwrap().name, "mgmt0");
    }
}
