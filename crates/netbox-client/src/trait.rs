//! NetBoxClient trait for mocking
//!
//! This trait abstracts the NetBoxClient to enable mocking in unit tests.
//! The concrete NetBoxClient implements this trait, and tests can use mock implementations.

use crate::error::NetBoxError;
use crate::models::*;

/// Trait for NetBox API client operations
///
/// Query methods take NetBox filter pairs (e.g. `[("slug", "HQ")]`); `fetch_all`
/// follows pagination to the last page.
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait NetBoxClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// Validate the API token
    async fn validate_token(&self) -> Result<(), NetBoxError>;

    // DCIM dependency Operations
    async fn query_device_roles(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<DeviceRole>, NetBoxError>;
    async fn create_device_role(&self, name: &str, slug: &str) -> Result<DeviceRole, NetBoxError>;
    async fn query_manufacturers(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Manufacturer>, NetBoxError>;
    async fn create_manufacturer(&self, name: &str, slug: &str) -> Result<Manufacturer, NetBoxError>;
    async fn query_device_types(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<DeviceType>, NetBoxError>;
    async fn create_device_type(&self, manufacturer_id: u64, model: &str, slug: &str) -> Result<DeviceType, NetBoxError>;
    async fn query_platforms(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Platform>, NetBoxError>;
    async fn create_platform(&self, name: &str, slug: &str, manufacturer_id: Option<u64>) -> Result<Platform, NetBoxError>;
    async fn query_sites(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Site>, NetBoxError>;
    async fn create_site(&self, name: &str, slug: &str, status: &str) -> Result<Site, NetBoxError>;

    // DCIM Operations
    async fn query_devices(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Device>, NetBoxError>;
    async fn create_device(&self, request: &NewDevice) -> Result<Device, NetBoxError>;
    async fn update_device(&self, id: u64, patch: &DevicePatch) -> Result<Device, NetBoxError>;
    async fn query_interfaces(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Interface>, NetBoxError>;
    async fn create_interface(&self, device_id: u64, name: &str, interface_type: &str, description: Option<&str>) -> Result<Interface, NetBoxError>;

    // IPAM Operations
    async fn query_ip_addresses(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<IPAddress>, NetBoxError>;
    async fn create_ip_address(&self, address: &str) -> Result<IPAddress, NetBoxError>;
    async fn update_ip_address(&self, id: u64, patch: &IPAddressPatch) -> Result<IPAddress, NetBoxError>;
}
