//! DCIM operations for MockNetBoxClient
//!
//! Handles device roles, manufacturers, device types, platforms, sites,
//! devices and interfaces

use super::helpers::matches_filters;
use super::MockNetBoxClient;
use crate::error::NetBoxError;
use crate::models::*;

fn slug_taken(endpoint: &str, slug: &str) -> NetBoxError {
    NetBoxError::Api(format!(
        "POST /api/{}/ failed: 400 Bad Request - {{\"slug\": [\"object with this slug already exists: {}\"]}}",
        endpoint, slug
    ))
}

fn missing_related(endpoint: &str, field: &str, id: u64) -> NetBoxError {
    NetBoxError::Api(format!(
        "POST /api/{}/ failed: 400 Bad Request - {{\"{}\": [\"Related object not found using the provided numeric ID: {}\"]}}",
        endpoint, field, id
    ))
}

pub async fn query_device_roles(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<DeviceRole>, NetBoxError> {
        let roles = client.device_roles.lock().unwrap();
        Ok(roles
            .values()
            .filter(|r| matches_filters(filters, |key| match key {
                "slug" => Some(r.slug.clone()),
                "name" => Some(r.name.clone()),
                "id" => Some(r.id.to_string()),
                _ => None,
            }))
            .cloned()
            .collect())
}

pub async fn create_device_role(client: &MockNetBoxClient, name: &str, slug: &str) -> Result<DeviceRole, NetBoxError> {
        if client.device_roles.lock().unwrap().values().any(|r| r.slug == slug) {
            return Err(slug_taken("dcim/device-roles", slug));
        }
        client.record_write("POST", "dcim/device-roles")?;

        let id = client.next_id();
        let role = DeviceRole {
            id,
            url: client.helpers().object_url("dcim/device-roles", id),
            display: name.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            description: String::new(),
        };
        client.device_roles.lock().unwrap().insert(id, role.clone());
        Ok(role)
}

pub async fn query_manufacturers(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<Manufacturer>, NetBoxError> {
        let manufacturers = client.manufacturers.lock().unwrap();
        Ok(manufacturers
            .values()
            .filter(|m| matches_filters(filters, |key| match key {
                "slug" => Some(m.slug.clone()),
                "name" => Some(m.name.clone()),
                "id" => Some(m.id.to_string()),
                _ => None,
            }))
            .cloned()
            .collect())
}

pub async fn create_manufacturer(client: &MockNetBoxClient, name: &str, slug: &str) -> Result<Manufacturer, NetBoxError> {
        if client.manufacturers.lock().unwrap().values().any(|m| m.slug == slug) {
            return Err(slug_taken("dcim/manufacturers", slug));
        }
        client.record_write("POST", "dcim/manufacturers")?;

        let id = client.next_id();
        let mfg = Manufacturer {
            id,
            url: client.helpers().object_url("dcim/manufacturers", id),
            display: name.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            description: String::new(),
        };
        client.manufacturers.lock().unwrap().insert(id, mfg.clone());
        Ok(mfg)
}

pub async fn query_device_types(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<DeviceType>, NetBoxError> {
        let device_types = client.device_types.lock().unwrap();
        Ok(device_types
            .values()
            .filter(|dt| matches_filters(filters, |key| match key {
                "slug" => Some(dt.slug.clone()),
                "model" => Some(dt.model.clone()),
                "manufacturer_id" => Some(dt.manufacturer.id.to_string()),
                "id" => Some(dt.id.to_string()),
                _ => None,
            }))
            .cloned()
            .collect())
}

pub async fn create_device_type(client: &MockNetBoxClient, manufacturer_id: u64, model: &str, slug: &str) -> Result<DeviceType, NetBoxError> {
        let manufacturer = client.manufacturers.lock().unwrap().get(&manufacturer_id).cloned()
            .ok_or_else(|| missing_related("dcim/device-types", "manufacturer", manufacturer_id))?;
        if client.device_types.lock().unwrap().values().any(|dt| dt.slug == slug) {
            return Err(slug_taken("dcim/device-types", slug));
        }
        client.record_write("POST", "dcim/device-types")?;

        let id = client.next_id();
        let device_type = DeviceType {
            id,
            url: client.helpers().object_url("dcim/device-types", id),
            display: model.to_string(),
            manufacturer: client.helpers().nested_manufacturer(&manufacturer),
            model: model.to_string(),
            slug: slug.to_string(),
            description: String::new(),
        };
        client.device_types.lock().unwrap().insert(id, device_type.clone());
        Ok(device_type)
}

pub async fn query_platforms(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<Platform>, NetBoxError> {
        let platforms = client.platforms.lock().unwrap();
        Ok(platforms
            .values()
            .filter(|p| matches_filters(filters, |key| match key {
                "slug" => Some(p.slug.clone()),
                "name" => Some(p.name.clone()),
                "id" => Some(p.id.to_string()),
                _ => None,
            }))
            .cloned()
            .collect())
}

pub async fn create_platform(client: &MockNetBoxClient, name: &str, slug: &str, manufacturer_id: Option<u64>) -> Result<Platform, NetBoxError> {
        let manufacturer = match manufacturer_id {
            Some(mfg_id) => Some(
                client.manufacturers.lock().unwrap().get(&mfg_id).cloned()
                    .ok_or_else(|| missing_related("dcim/platforms", "manufacturer", mfg_id))?,
            ),
            None => None,
        };
        if client.platforms.lock().unwrap().values().any(|p| p.slug == slug) {
            return Err(slug_taken("dcim/platforms", slug));
        }
        client.record_write("POST", "dcim/platforms")?;

        let id = client.next_id();
        let platform = Platform {
            id,
            url: client.helpers().object_url("dcim/platforms", id),
            display: name.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            manufacturer: manufacturer.map(|m| client.helpers().nested_manufacturer(&m)),
            description: String::new(),
        };
        client.platforms.lock().unwrap().insert(id, platform.clone());
        Ok(platform)
}

pub async fn query_sites(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<Site>, NetBoxError> {
        let sites = client.sites.lock().unwrap();
        Ok(sites
            .values()
            .filter(|s| matches_filters(filters, |key| match key {
                "slug" => Some(s.slug.clone()),
                "name" => Some(s.name.clone()),
                "id" => Some(s.id.to_string()),
                _ => None,
            }))
            .cloned()
            .collect())
}

pub async fn create_site(client: &MockNetBoxClient, name: &str, slug: &str, status: &str) -> Result<Site, NetBoxError> {
        if client.sites.lock().unwrap().values().any(|s| s.slug == slug) {
            return Err(slug_taken("dcim/sites", slug));
        }
        client.record_write("POST", "dcim/sites")?;

        let id = client.next_id();
        let site = Site {
            id,
            url: client.helpers().object_url("dcim/sites", id),
            display: name.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            status: Some(ChoiceValue::new(status)),
            description: String::new(),
        };
        client.sites.lock().unwrap().insert(id, site.clone());
        Ok(site)
}

pub async fn query_devices(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<Device>, NetBoxError> {
        let devices = client.devices.lock().unwrap();
        Ok(devices
            .values()
            .filter(|d| matches_filters(filters, |key| match key {
                "name" => d.name.clone(),
                "id" => Some(d.id.to_string()),
                "site_id" => Some(d.site.id.to_string()),
                _ => None,
            }))
            .cloned()
            .collect())
}

pub async fn create_device(client: &MockNetBoxClient, request: &NewDevice) -> Result<Device, NetBoxError> {
        let helpers = client.helpers();
        let device_type = client.device_types.lock().unwrap().get(&request.device_type).cloned()
            .ok_or_else(|| missing_related("dcim/devices", "device_type", request.device_type))?;
        let role = client.device_roles.lock().unwrap().get(&request.role).cloned()
            .ok_or_else(|| missing_related("dcim/devices", "role", request.role))?;
        let site = client.sites.lock().unwrap().get(&request.site).cloned()
            .ok_or_else(|| missing_related("dcim/devices", "site", request.site))?;
        let platform = match request.platform {
            Some(platform_id) => Some(
                client.platforms.lock().unwrap().get(&platform_id).cloned()
                    .ok_or_else(|| missing_related("dcim/devices", "platform", platform_id))?,
            ),
            None => None,
        };
        if client.devices.lock().unwrap().values().any(|d| {
            d.name.as_deref() == Some(request.name.as_str()) && d.site.id == site.id
        }) {
            return Err(NetBoxError::Api(format!(
                "POST /api/dcim/devices/ failed: 400 Bad Request - {{\"__all__\": [\"Device name must be unique per site: {}\"]}}",
                request.name
            )));
        }
        client.record_write("POST", "dcim/devices")?;

        let id = client.next_id();
        let device = Device {
            id,
            url: helpers.object_url("dcim/devices", id),
            display: request.name.clone(),
            name: Some(request.name.clone()),
            device_type: helpers.nested_device_type(&device_type),
            role: helpers.nested_device_role(&role),
            site: helpers.nested_site(&site),
            platform: platform.map(|p| helpers.nested_platform(&p)),
            serial: request.serial.clone().unwrap_or_default(),
            status: Some(ChoiceValue::new(&request.status)),
            primary_ip4: None,
            description: request.description.clone().unwrap_or_default(),
        };
        client.devices.lock().unwrap().insert(id, device.clone());
        Ok(device)
}

pub async fn update_device(client: &MockNetBoxClient, id: u64, patch: &DevicePatch) -> Result<Device, NetBoxError> {
        let helpers = client.helpers();
        if !client.devices.lock().unwrap().contains_key(&id) {
            return Err(NetBoxError::NotFound(format!("Device {} not found", id)));
        }
        if patch.is_empty() {
            return Err(NetBoxError::InvalidRequest(format!("Empty patch for device {}", id)));
        }

        // Resolve references before touching the stored device
        let device_type = match patch.device_type {
            Some(dt_id) => Some(client.device_types.lock().unwrap().get(&dt_id).cloned()
                .ok_or_else(|| missing_related("dcim/devices", "device_type", dt_id))?),
            None => None,
        };
        let role = match patch.role {
            Some(role_id) => Some(client.device_roles.lock().unwrap().get(&role_id).cloned()
                .ok_or_else(|| missing_related("dcim/devices", "role", role_id))?),
            None => None,
        };
        let site = match patch.site {
            Some(site_id) => Some(client.sites.lock().unwrap().get(&site_id).cloned()
                .ok_or_else(|| missing_related("dcim/devices", "site", site_id))?),
            None => None,
        };
        let platform = match patch.platform {
            Some(platform_id) => Some(client.platforms.lock().unwrap().get(&platform_id).cloned()
                .ok_or_else(|| missing_related("dcim/devices", "platform", platform_id))?),
            None => None,
        };
        let primary_ip4 = match patch.primary_ip4 {
            Some(ip_id) => Some(client.ip_addresses.lock().unwrap().get(&ip_id).cloned()
                .ok_or_else(|| missing_related("dcim/devices", "primary_ip4", ip_id))?),
            None => None,
        };
        client.record_write("PATCH", &format!("dcim/devices/{}", id))?;

        let mut devices = client.devices.lock().unwrap();
        let device = devices
            .get_mut(&id)
            .ok_or_else(|| NetBoxError::NotFound(format!("Device {} not found", id)))?;
        if let Some(dt) = device_type {
            device.device_type = helpers.nested_device_type(&dt);
        }
        if let Some(r) = role {
            device.role = helpers.nested_device_role(&r);
        }
        if let Some(s) = site {
            device.site = helpers.nested_site(&s);
        }
        if let Some(p) = platform {
            device.platform = Some(helpers.nested_platform(&p));
        }
        if let Some(ip) = primary_ip4 {
            device.primary_ip4 = Some(helpers.nested_ip_address(&ip));
        }
        if let Some(serial) = &patch.serial {
            device.serial = serial.clone();
        }
        if let Some(description) = &patch.description {
            device.description = description.clone();
        }
        Ok(device.clone())
}

pub async fn query_interfaces(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<Interface>, NetBoxError> {
        let interfaces = client.interfaces.lock().unwrap();
        Ok(interfaces
            .values()
            .filter(|i| matches_filters(filters, |key| match key {
                "name" => Some(i.name.clone()),
                "device_id" => Some(i.device.id.to_string()),
                "device" => i.device.name.clone(),
                "id" => Some(i.id.to_string()),
                _ => None,
            }))
            .cloned()
            .collect())
}

pub async fn create_interface(client: &MockNetBoxClient, device_id: u64, name: &str, interface_type: &str, description: Option<&str>) -> Result<Interface, NetBoxError> {
        let device = client.devices.lock().unwrap().get(&device_id).cloned()
            .ok_or_else(|| missing_related("dcim/interfaces", "device", device_id))?;
        if client.interfaces.lock().unwrap().values().any(|i| i.device.id == device_id && i.name == name) {
            return Err(NetBoxError::Api(format!(
                "POST /api/dcim/interfaces/ failed: 400 Bad Request - {{\"__all__\": [\"Interface {} already exists on device {}\"]}}",
                name, device_id
            )));
        }
        client.record_write("POST", "dcim/interfaces")?;

        let id = client.next_id();
        let interface = Interface {
            id,
            url: client.helpers().object_url("dcim/interfaces", id),
            display: name.to_string(),
            device: client.helpers().nested_device(&device),
            name: name.to_string(),
            interface_type: Some(ChoiceValue::new(interface_type)),
            description: description.unwrap_or_default().to_string(),
        };
        client.interfaces.lock().unwrap().insert(id, interface.clone());
        Ok(interface)
}
