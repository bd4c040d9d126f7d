//! IPAM operations for MockNetBoxClient
//!
//! Handles IP addresses

use super::helpers::matches_filters;
use super::MockNetBoxClient;
use crate::error::NetBoxError;
use crate::models::*;

pub async fn query_ip_addresses(client: &MockNetBoxClient, filters: &[(&str, &str)], _fetch_all: bool) -> Result<Vec<IPAddress>, NetBoxError> {
        let ip_addresses = client.ip_addresses.lock().unwrap();
        Ok(ip_addresses
            .values()
            .filter(|ip| {
                // NetBox matches a bare address against the host of any prefix length
                let bare = filters
                    .iter()
                    .any(|&(key, value)| key == "address" && !value.contains('/'));
                matches_filters(filters, |key| match key {
                    "address" if bare => Some(ip.host().to_string()),
                    "address" => Some(ip.address.clone()),
                    "id" => Some(ip.id.to_string()),
                    "assigned_object_id" => ip.assigned_object_id.map(|id| id.to_string()),
                    _ => None,
                })
            })
            .cloned()
            .collect())
}

pub async fn create_ip_address(client: &MockNetBoxClient, address: &str) -> Result<IPAddress, NetBoxError> {
        if !address.contains('/') {
            return Err(NetBoxError::Api(format!(
                "POST /api/ipam/ip-addresses/ failed: 400 Bad Request - {{\"address\": [\"CIDR mask (e.g. /24) is required: {}\"]}}",
                address
            )));
        }
        client.record_write("POST", "ipam/ip-addresses")?;

        let id = client.next_id();
        let ip = IPAddress {
            id,
            url: client.helpers().object_url("ipam/ip-addresses", id),
            display: address.to_string(),
            family: Some(ChoiceValue { value: "4".to_string(), label: "IPv4".to_string() }),
            address: address.to_string(),
            status: Some(ChoiceValue::new("active")),
            assigned_object_type: None,
            assigned_object_id: None,
            assigned_object: None,
            description: String::new(),
        };
        client.ip_addresses.lock().unwrap().insert(id, ip.clone());
        Ok(ip)
}

pub async fn update_ip_address(client: &MockNetBoxClient, id: u64, patch: &IPAddressPatch) -> Result<IPAddress, NetBoxError> {
        if !client.ip_addresses.lock().unwrap().contains_key(&id) {
            return Err(NetBoxError::NotFound(format!("IP address {} not found", id)));
        }
        if patch.is_empty() {
            return Err(NetBoxError::InvalidRequest(format!("Empty patch for IP address {}", id)));
        }
        let assigned = match patch.assigned_object_id {
            Some(intf_id) => Some(client.interfaces.lock().unwrap().get(&intf_id).cloned().ok_or_else(|| {
                NetBoxError::Api(format!(
                    "PATCH /api/ipam/ip-addresses/{}/ failed: 400 Bad Request - {{\"assigned_object_id\": [\"Related object not found: {}\"]}}",
                    id, intf_id
                ))
            })?),
            None => None,
        };
        client.record_write("PATCH", &format!("ipam/ip-addresses/{}", id))?;

        let mut ip_addresses = client.ip_addresses.lock().unwrap();
        let ip = ip_addresses
            .get_mut(&id)
            .ok_or_else(|| NetBoxError::NotFound(format!("IP address {} not found", id)))?;
        if let Some(address) = &patch.address {
            ip.address = address.clone();
            ip.display = address.clone();
        }
        if let Some(object_type) = &patch.assigned_object_type {
            ip.assigned_object_type = Some(object_type.clone());
        }
        if let Some(interface) = assigned {
            ip.assigned_object_id = Some(interface.id);
            ip.assigned_object = Some(serde_json::json!({
                "id": interface.id,
                "url": interface.url,
                "name": interface.name,
                "device": { "id": interface.device.id, "name": interface.device.name },
            }));
        }
        Ok(ip.clone())
}
