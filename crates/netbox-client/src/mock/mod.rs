//! Mock NetBoxClient for unit testing
//!
//! This module provides a mock implementation of NetBoxClientTrait that can be used
//! in unit tests without requiring a running NetBox instance.
//!
//! The mock is organized into domain-specific modules:
//! - `dcim.rs` - DCIM operations (roles, manufacturers, device types, platforms, sites, devices, interfaces)
//! - `ipam.rs` - IPAM operations (IP addresses)
//! - `helpers.rs` - Filter matching and nested type construction
//!
//! Every successful write is appended to a journal (`writes()`), so tests can
//! assert that a second reconciliation pass is a no-op. Writes to an endpoint
//! can be made to fail with `fail_writes_to`.

mod helpers;
mod ipam;
mod dcim;

use crate::error::NetBoxError;
use crate::models::*;
use crate::netbox_trait::NetBoxClientTrait;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock NetBoxClient for testing
///
/// This mock stores resources in memory, keyed by ID, and applies the same
/// uniqueness and foreign-key checks NetBox would for the fields the sync uses.
#[derive(Debug, Clone)]
pub struct MockNetBoxClient {
    pub(crate) base_url: String,
    // In-memory storage for resources
    pub(crate) device_roles: Arc<Mutex<BTreeMap<u64, DeviceRole>>>,
    pub(crate) manufacturers: Arc<Mutex<BTreeMap<u64, Manufacturer>>>,
    pub(crate) device_types: Arc<Mutex<BTreeMap<u64, DeviceType>>>,
    pub(crate) platforms: Arc<Mutex<BTreeMap<u64, Platform>>>,
    pub(crate) sites: Arc<Mutex<BTreeMap<u64, Site>>>,
    pub(crate) devices: Arc<Mutex<BTreeMap<u64, Device>>>,
    pub(crate) interfaces: Arc<Mutex<BTreeMap<u64, Interface>>>,
    pub(crate) ip_addresses: Arc<Mutex<BTreeMap<u64, IPAddress>>>,
    // Journal of successful writes ("POST dcim/devices", "PATCH ipam/ip-addresses/3")
    pub(crate) writes: Arc<Mutex<Vec<String>>>,
    // Endpoints whose writes are rejected
    pub(crate) failing: Arc<Mutex<HashSet<String>>>,
    // Counter for generating IDs
    pub(crate) next_id: Arc<Mutex<u64>>,
}

impl MockNetBoxClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            device_roles: Arc::new(Mutex::new(BTreeMap::new())),
            manufacturers: Arc::new(Mutex::new(BTreeMap::new())),
            device_types: Arc::new(Mutex::new(BTreeMap::new())),
            platforms: Arc::new(Mutex::new(BTreeMap::new())),
            sites: Arc::new(Mutex::new(BTreeMap::new())),
            devices: Arc::new(Mutex::new(BTreeMap::new())),
            interfaces: Arc::new(Mutex::new(BTreeMap::new())),
            ip_addresses: Arc::new(Mutex::new(BTreeMap::new())),
            writes: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(Mutex::new(HashSet::new())),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    /// Reject every write to `endpoint` (e.g. "dcim/device-roles") with a NetBox validation error
    pub fn fail_writes_to(&self, endpoint: &str) {
        self.failing.lock().unwrap().insert(endpoint.to_string());
    }

    /// Accept writes to `endpoint` again
    pub fn restore_writes_to(&self, endpoint: &str) {
        self.failing.lock().unwrap().remove(endpoint);
    }

    /// Journal of successful writes, oldest first
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    /// Forget the write journal (e.g. after test setup)
    pub fn clear_writes(&self) {
        self.writes.lock().unwrap().clear();
    }

    /// Snapshot of stored devices
    pub fn devices(&self) -> Vec<Device> {
        self.devices.lock().unwrap().values().cloned().collect()
    }

    /// Snapshot of stored interfaces
    pub fn interfaces(&self) -> Vec<Interface> {
        self.interfaces.lock().unwrap().values().cloned().collect()
    }

    /// Snapshot of stored IP addresses
    pub fn ip_addresses(&self) -> Vec<IPAddress> {
        self.ip_addresses.lock().unwrap().values().cloned().collect()
    }

    /// Snapshot of stored device roles
    pub fn device_roles(&self) -> Vec<DeviceRole> {
        self.device_roles.lock().unwrap().values().cloned().collect()
    }

    /// Snapshot of stored manufacturers
    pub fn manufacturers(&self) -> Vec<Manufacturer> {
        self.manufacturers.lock().unwrap().values().cloned().collect()
    }

    /// Snapshot of stored device types
    pub fn device_types(&self) -> Vec<DeviceType> {
        self.device_types.lock().unwrap().values().cloned().collect()
    }

    /// Snapshot of stored platforms
    pub fn platforms(&self) -> Vec<Platform> {
        self.platforms.lock().unwrap().values().cloned().collect()
    }

    /// Snapshot of stored sites
    pub fn sites(&self) -> Vec<Site> {
        self.sites.lock().unwrap().values().cloned().collect()
    }

    /// Generate next ID
    pub(crate) fn next_id(&self) -> u64 {
        let mut id = self.next_id.lock().unwrap();
        let current = *id;
        *id += 1;
        current
    }

    /// Check failure injection for a write, then journal it
    pub(crate) fn record_write(&self, method: &str, endpoint: &str) -> Result<(), NetBoxError> {
        let base = endpoint.split('/').take(2).collect::<Vec<_>>().join("/");
        if self.failing.lock().unwrap().contains(&base) {
            return Err(NetBoxError::Api(format!(
                "{} /api/{}/ failed: 400 Bad Request - {{\"__all__\": [\"Injected failure\"]}}",
                method, endpoint
            )));
        }
        self.writes.lock().unwrap().push(format!("{} {}", method, endpoint));
        Ok(())
    }

    /// Get helpers instance
    pub(crate) fn helpers(&self) -> helpers::Helpers {
        helpers::Helpers::new(self.base_url.clone())
    }
}

#[async_trait::async_trait]
impl NetBoxClientTrait for MockNetBoxClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn validate_token(&self) -> Result<(), NetBoxError> {
        Ok(())
    }

    // DCIM dependency Operations - delegated to dcim module
    async fn query_device_roles(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<DeviceRole>, NetBoxError> {
        dcim::query_device_roles(self, filters, fetch_all).await
    }

    async fn create_device_role(&self, name: &str, slug: &str) -> Result<DeviceRole, NetBoxError> {
        dcim::create_device_role(self, name, slug).await
    }

    async fn query_manufacturers(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Manufacturer>, NetBoxError> {
        dcim::query_manufacturers(self, filters, fetch_all).await
    }

    async fn create_manufacturer(&self, name: &str, slug: &str) -> Result<Manufacturer, NetBoxError> {
        dcim::create_manufacturer(self, name, slug).await
    }

    async fn query_device_types(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<DeviceType>, NetBoxError> {
        dcim::query_device_types(self, filters, fetch_all).await
    }

    async fn create_device_type(&self, manufacturer_id: u64, model: &str, slug: &str) -> Result<DeviceType, NetBoxError> {
        dcim::create_device_type(self, manufacturer_id, model, slug).await
    }

    async fn query_platforms(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Platform>, NetBoxError> {
        dcim::query_platforms(self, filters, fetch_all).await
    }

    async fn create_platform(&self, name: &str, slug: &str, manufacturer_id: Option<u64>) -> Result<Platform, NetBoxError> {
        dcim::create_platform(self, name, slug, manufacturer_id).await
    }

    async fn query_sites(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Site>, NetBoxError> {
        dcim::query_sites(self, filters, fetch_all).await
    }

    async fn create_site(&self, name: &str, slug: &str, status: &str) -> Result<Site, NetBoxError> {
        dcim::create_site(self, name, slug, status).await
    }

    // DCIM Operations - delegated to dcim module
    async fn query_devices(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Device>, NetBoxError> {
        dcim::query_devices(self, filters, fetch_all).await
    }

    async fn create_device(&self, request: &NewDevice) -> Result<Device, NetBoxError> {
        dcim::create_device(self, request).await
    }

    async fn update_device(&self, id: u64, patch: &DevicePatch) -> Result<Device, NetBoxError> {
        dcim::update_device(self, id, patch).await
    }

    async fn query_interfaces(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Interface>, NetBoxError> {
        dcim::query_interfaces(self, filters, fetch_all).await
    }

    async fn create_interface(&self, device_id: u64, name: &str, interface_type: &str, description: Option<&str>) -> Result<Interface, NetBoxError> {
        dcim::create_interface(self, device_id, name, interface_type, description).await
    }

    // IPAM Operations - delegated to ipam module
    async fn query_ip_addresses(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<IPAddress>, NetBoxError> {
        ipam::query_ip_addresses(self, filters, fetch_all).await
    }

    async fn create_ip_address(&self, address: &str) -> Result<IPAddress, NetBoxError> {
        ipam::create_ip_address(self, address).await
    }

    async fn update_ip_address(&self, id: u64, patch: &IPAddressPatch) -> Result<IPAddress, NetBoxError> {
        ipam::update_ip_address(self, id, patch).await
    }
}
