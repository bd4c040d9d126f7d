//! Test utilities for unit testing the reconciler
//!
//! Builds configs, NMS devices and snapshots, and runs a sync against a
//! `MockNetBoxClient`.

use crate::config::SyncConfig;
use crate::report::SyncReport;
use netbox_client::{Device, MockNetBoxClient};
use nms_source::{LOCATION_PROPERTY, NmsDevice, SnapshotSource};

pub const GROUP: &str = "Core";

/// Config with the defaults of a minimal plugin payload
pub fn test_config() -> SyncConfig {
    SyncConfig::from_json(&format!(
        r#"{{
            "end_point": "http://test-netbox",
            "token": "test-token",
            "default_mask": "24",
            "device_group": "{}",
            "default_site": "HQ"
        }}"#,
        GROUP
    ))
    .unwrap()
}

/// Complete NMS device with a management interface called mgmt0
pub fn create_test_device(name: &str, mgmt_ip: &str) -> NmsDevice {
    NmsDevice {
        name: Some(name.to_string()),
        mgmt_ip: Some(mgmt_ip.to_string()),
        mgmt_intf: Some("mgmt0".to_string()),
        vendor: Some("Cisco".to_string()),
        sub_type_name: Some("Switch".to_string()),
        main_type_name: Some("L2 Switch".to_string()),
        model: Some("C9300".to_string()),
        ..Default::default()
    }
}

/// Snapshot holding `devices` in the test group, each with an uplink and a
/// management interface. Device ids are `dev-<name>`.
pub fn create_test_source(devices: Vec<NmsDevice>) -> SnapshotSource {
    let mut source = SnapshotSource::default();
    for device in devices {
        let name = device.name.clone().unwrap_or_default();
        let mgmt_intf = device.mgmt_intf.clone().unwrap_or_else(|| "mgmt0".to_string());
        source = source
            .with_device(GROUP, &device_id(&name), device)
            .with_interface(&name, &format!("{}-if-1", name), "Gi1/0/1", None)
            .with_interface(&name, &format!("{}-if-2", name), &mgmt_intf, Some("Out-of-band management"));
    }
    source
}

pub fn device_id(name: &str) -> String {
    format!("dev-{}", name)
}

/// Set the NMS location of a device
pub fn with_location(source: SnapshotSource, name: &str, location: &str) -> SnapshotSource {
    source.with_property(name, LOCATION_PROPERTY, location)
}

pub fn mock_netbox() -> MockNetBoxClient {
    MockNetBoxClient::new("http://test-netbox")
}

/// One full run against the mock
pub async fn sync_once(config: &SyncConfig, netbox: &MockNetBoxClient, source: &SnapshotSource) -> SyncReport {
    crate::sync(config, Box::new(netbox.clone()), source).await.unwrap()
}

/// The mock's device called `name`
pub fn netbox_device(netbox: &MockNetBoxClient, name: &str) -> Device {
    netbox
        .devices()
        .into_iter()
        .find(|d| d.name.as_deref() == Some(name))
        .unwrap_or_else(|| panic!("device {} not in NetBox", name))
}
