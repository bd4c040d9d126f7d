//! NetBox API client
//!
//! Covers the DCIM and IPAM objects the inventory sync reconciles. Every
//! collection is queried with NetBox filter pairs; updates are partial
//! (`PATCH`) and only carry the fields a patch sets.

use crate::common::HttpClient;
use crate::common::query::query_resources;
use crate::error::NetBoxError;
use crate::models::*;
use crate::netbox_trait::NetBoxClientTrait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const DEVICE_ROLES: &str = "dcim/device-roles";
const MANUFACTURERS: &str = "dcim/manufacturers";
const DEVICE_TYPES: &str = "dcim/device-types";
const PLATFORMS: &str = "dcim/platforms";
const SITES: &str = "dcim/sites";
const DEVICES: &str = "dcim/devices";
const INTERFACES: &str = "dcim/interfaces";
const IP_ADDRESSES: &str = "ipam/ip-addresses";

/// NetBox API client
#[derive(Debug, Clone)]
pub struct NetBoxClient {
    http: HttpClient,
}

impl NetBoxClient {
    /// Client with the default timeout and TLS verification on
    ///
    /// # Arguments
    /// * `base_url` - NetBox base URL (e.g., "http://netbox:80")
    /// * `token` - API token for authentication
    pub fn new(base_url: String, token: String) -> Result<Self, NetBoxError> {
        Self::with_options(base_url, token, DEFAULT_TIMEOUT, true)
    }

    /// Client with an explicit per-request timeout and TLS verification mode.
    ///
    /// `verify_tls = false` accepts self-signed certificates.
    pub fn with_options(
        base_url: String,
        token: String,
        timeout: Duration,
        verify_tls: bool,
    ) -> Result<Self, NetBoxError> {
        if base_url.trim().is_empty() {
            return Err(NetBoxError::InvalidRequest("NetBox base URL is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(!verify_tls)
            .build()?;

        Ok(Self {
            http: HttpClient::new(client, base_url, token),
        })
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Check connectivity and the token against the (authenticated) status endpoint
    pub async fn validate_token(&self) -> Result<(), NetBoxError> {
        debug!("Validating NetBox token and connectivity");
        let _: serde_json::Value = self.http.get("/api/status/").await?;
        debug!("Token validated successfully");
        Ok(())
    }

    async fn query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        filters: &[(&str, &str)],
        fetch_all: bool,
    ) -> Result<Vec<T>, NetBoxError> {
        debug!("Querying {} with filters: {:?}", endpoint, filters);
        query_resources(&self.http, endpoint, filters, fetch_all).await
    }

    async fn create<T: DeserializeOwned>(&self, endpoint: &str, body: serde_json::Value) -> Result<T, NetBoxError> {
        self.http.post(&format!("/api/{}/", endpoint), &body).await
    }

    /// PATCH one object; an empty patch never leaves the client
    async fn update<T: DeserializeOwned, P: Serialize>(
        &self,
        endpoint: &str,
        id: u64,
        patch: &P,
        is_empty: bool,
    ) -> Result<T, NetBoxError> {
        if is_empty {
            return Err(NetBoxError::InvalidRequest(format!("Empty patch for {} {}", endpoint, id)));
        }
        debug!("Updating {} {} in NetBox", endpoint, id);
        let body = serde_json::to_value(patch)?;
        self.http.patch(&format!("/api/{}/{}/", endpoint, id), &body).await
    }

    pub async fn query_device_roles(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<DeviceRole>, NetBoxError> {
        self.query(DEVICE_ROLES, filters, fetch_all).await
    }

    pub async fn create_device_role(&self, name: &str, slug: &str) -> Result<DeviceRole, NetBoxError> {
        debug!("Creating device role {} in NetBox", name);
        self.create(DEVICE_ROLES, json!({ "name": name, "slug": slug })).await
    }

    pub async fn query_manufacturers(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Manufacturer>, NetBoxError> {
        self.query(MANUFACTURERS, filters, fetch_all).await
    }

    pub async fn create_manufacturer(&self, name: &str, slug: &str) -> Result<Manufacturer, NetBoxError> {
        debug!("Creating manufacturer {} in NetBox", name);
        self.create(MANUFACTURERS, json!({ "name": name, "slug": slug })).await
    }

    pub async fn query_device_types(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<DeviceType>, NetBoxError> {
        self.query(DEVICE_TYPES, filters, fetch_all).await
    }

    /// Create a device type under a manufacturer
    pub async fn create_device_type(&self, manufacturer_id: u64, model: &str, slug: &str) -> Result<DeviceType, NetBoxError> {
        debug!("Creating device type {} (manufacturer {}) in NetBox", model, manufacturer_id);
        self.create(DEVICE_TYPES, json!({ "manufacturer": manufacturer_id, "model": model, "slug": slug }))
            .await
    }

    pub async fn query_platforms(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Platform>, NetBoxError> {
        self.query(PLATFORMS, filters, fetch_all).await
    }

    /// Create a platform, optionally tied to a manufacturer
    pub async fn create_platform(&self, name: &str, slug: &str, manufacturer_id: Option<u64>) -> Result<Platform, NetBoxError> {
        debug!("Creating platform {} in NetBox", name);
        let mut body = json!({ "name": name, "slug": slug });
        if let Some(mfg) = manufacturer_id {
            body["manufacturer"] = json!(mfg);
        }
        self.create(PLATFORMS, body).await
    }

    pub async fn query_sites(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Site>, NetBoxError> {
        self.query(SITES, filters, fetch_all).await
    }

    pub async fn create_site(&self, name: &str, slug: &str, status: &str) -> Result<Site, NetBoxError> {
        debug!("Creating site {} in NetBox", name);
        self.create(SITES, json!({ "name": name, "slug": slug, "status": status })).await
    }

    /// Query devices (e.g. `[("name", "router-01")]`)
    pub async fn query_devices(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Device>, NetBoxError> {
        self.query(DEVICES, filters, fetch_all).await
    }

    pub async fn create_device(&self, request: &NewDevice) -> Result<Device, NetBoxError> {
        debug!("Creating device {} in NetBox", request.name);
        self.create(DEVICES, serde_json::to_value(request)?).await
    }

    pub async fn update_device(&self, id: u64, patch: &DevicePatch) -> Result<Device, NetBoxError> {
        self.update(DEVICES, id, patch, patch.is_empty()).await
    }

    /// Query interfaces (e.g. `[("device_id", "4"), ("name", "mgmt0")]`)
    pub async fn query_interfaces(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Interface>, NetBoxError> {
        self.query(INTERFACES, filters, fetch_all).await
    }

    pub async fn create_interface(
        &self,
        device_id: u64,
        name: &str,
        interface_type: &str,
        description: Option<&str>,
    ) -> Result<Interface, NetBoxError> {
        debug!("Creating interface {} on device {} in NetBox", name, device_id);
        let mut body = json!({ "device": device_id, "name": name, "type": interface_type });
        if let Some(desc) = description {
            body["description"] = json!(desc);
        }
        self.create(INTERFACES, body).await
    }

    /// Query IP addresses.
    ///
    /// NetBox matches an `address` filter without a prefix length against the
    /// host part of every stored address, whatever its mask.
    pub async fn query_ip_addresses(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<IPAddress>, NetBoxError> {
        self.query(IP_ADDRESSES, filters, fetch_all).await
    }

    /// Create an IP address from CIDR notation (e.g. "192.168.1.1/24")
    pub async fn create_ip_address(&self, address: &str) -> Result<IPAddress, NetBoxError> {
        debug!("Creating IP address {} in NetBox", address);
        self.create(IP_ADDRESSES, json!({ "address": address })).await
    }

    pub async fn update_ip_address(&self, id: u64, patch: &IPAddressPatch) -> Result<IPAddress, NetBoxError> {
        self.update(IP_ADDRESSES, id, patch, patch.is_empty()).await
    }
}

#[async_trait::async_trait]
impl NetBoxClientTrait for NetBoxClient {
    fn base_url(&self) -> &str {
        self.base_url()
    }

    async fn validate_token(&self) -> Result<(), NetBoxError> {
        self.validate_token().await
    }

    async fn query_device_roles(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<DeviceRole>, NetBoxError> {
        self.query_device_roles(filters, fetch_all).await
    }

    async fn create_device_role(&self, name: &str, slug: &str) -> Result<DeviceRole, NetBoxError> {
        self.create_device_role(name, slug).await
    }

    async fn query_manufacturers(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Manufacturer>, NetBoxError> {
        self.query_manufacturers(filters, fetch_all).await
    }

    async fn create_manufacturer(&self, name: &str, slug: &str) -> Result<Manufacturer, NetBoxError> {
        self.create_manufacturer(name, slug).await
    }

    async fn query_device_types(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<DeviceType>, NetBoxError> {
        self.query_device_types(filters, fetch_all).await
    }

    async fn create_device_type(&self, manufacturer_id: u64, model: &str, slug: &str) -> Result<DeviceType, NetBoxError> {
        self.create_device_type(manufacturer_id, model, slug).await
    }

    async fn query_platforms(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Platform>, NetBoxError> {
        self.query_platforms(filters, fetch_all).await
    }

    async fn create_platform(&self, name: &str, slug: &str, manufacturer_id: Option<u64>) -> Result<Platform, NetBoxError> {
        self.create_platform(name, slug, manufacturer_id).await
    }

    async fn query_sites(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Site>, NetBoxError> {
        self.query_sites(filters, fetch_all).await
    }

    async fn create_site(&self, name: &str, slug: &str, status: &str) -> Result<Site, NetBoxError> {
        self.create_site(name, slug, status).await
    }

    async fn query_devices(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Device>, NetBoxError> {
        self.query_devices(filters, fetch_all).await
    }

    async fn create_device(&self, request: &NewDevice) -> Result<Device, NetBoxError> {
        self.create_device(request).await
    }

    async fn update_device(&self, id: u64, patch: &DevicePatch) -> Result<Device, NetBoxError> {
        self.update_device(id, patch).await
    }

    async fn query_interfaces(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<Interface>, NetBoxError> {
        self.query_interfaces(filters, fetch_all).await
    }

    async fn create_interface(&self, device_id: u64, name: &str, interface_type: &str, description: Option<&str>) -> Result<Interface, NetBoxError> {
        self.create_interface(device_id, name, interface_type, description).await
    }

    async fn query_ip_addresses(&self, filters: &[(&str, &str)], fetch_all: bool) -> Result<Vec<IPAddress>, NetBoxError> {
        self.query_ip_addresses(filters, fetch_all).await
    }

    async fn create_ip_address(&self, address: &str) -> Result<IPAddress, NetBoxError> {
        self.create_ip_address(address).await
    }

    async fn update_ip_address(&self, id: u64, patch: &IPAddressPatch) -> Result<IPAddress, NetBoxError> {
        self.update_ip_address(id, patch).await
    }
}
