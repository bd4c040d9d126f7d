//! Management interface and IP reconciler
//!
//! Four steps, each idempotent on its own: the management interface, the
//! management IP with its mask, the IP-to-interface assignment, and the
//! device's primary IPv4. Assignment and primary IP are set once and never
//! overwritten.

use super::Reconciler;
use crate::normalize::NormalizedDevice;
use crate::reconcile_helpers::attempt;
use crate::report::Stage;
use netbox_client::{Device, DevicePatch, INTERFACE_OBJECT_TYPE, IPAddress, IPAddressPatch, Interface};
use nms_source::{INTERFACE_KIND_L3, NmsInterface};
use tracing::{debug, error, info, warn};

/// Interface type given to management interfaces the sync creates
const MGMT_INTERFACE_TYPE: &str = "other";

impl Reconciler<'_> {
    /// Run the interface/IP steps for a device that exists in NetBox
    pub(crate) async fn ensure_management_ip(&mut self, device: &NormalizedDevice, netbox_device: &Device, cidr: &str) {
        let interface = self.ensure_management_interface(device, netbox_device).await;

        let Some(mut ip) = self.ensure_ip_address(device, cidr).await else {
            return;
        };

        let Some(interface) = interface else {
            warn!("No management interface for {}, leaving {} unassigned", device.name, ip.address);
            return;
        };

        if let Some(assigned) = self.assign_ip(device, &ip, &interface).await {
            ip = assigned;
        }

        // NetBox only accepts a primary IP that sits on one of the device's interfaces
        if is_assigned_to(&ip, &interface) {
            self.ensure_primary_ip(device, netbox_device, &ip).await;
        } else {
            let message = format!(
                "IP address {} is assigned to another object, leaving primary IPv4 of {} unset",
                ip.address, device.name
            );
            warn!("{}", message);
            self.report.record_issue(&device.name, Stage::PrimaryIp, message);
        }
    }

    /// The NMS record of the device's management interface
    async fn find_nms_interface(&mut self, device: &NormalizedDevice) -> Option<NmsInterface> {
        let refs = match self.source.interface_refs(&device.name, INTERFACE_KIND_L3).await {
            Ok(refs) => refs,
            Err(e) => {
                let message = format!("Failed to enumerate interfaces of {}: {}", device.name, e);
                error!("{}", message);
                self.report.record_issue(&device.name, Stage::Interface, message);
                return None;
            }
        };

        for interface_ref in &refs {
            match self.source.interface(interface_ref).await {
                Ok(detail) if detail.name == device.mgmt_intf => return Some(detail),
                Ok(_) => {}
                Err(e) => warn!("Failed to read interface {} of {}: {}", interface_ref.id, device.name, e),
            }
        }

        let message = format!(
            "Management interface {} not reported by NMS for {}",
            device.mgmt_intf, device.name
        );
        warn!("{}", message);
        self.report.record_issue(&device.name, Stage::Interface, message);
        None
    }

    /// Get-or-create the management interface on the NetBox device
    pub(crate) async fn ensure_management_interface(
        &mut self,
        device: &NormalizedDevice,
        netbox_device: &Device,
    ) -> Option<Interface> {
        let nms_interface = self.find_nms_interface(device).await?;
        let device_id = netbox_device.id.to_string();

        let existing = attempt(
            &mut self.report,
            &device.name,
            Stage::Interface,
            &format!("look up interface {} on {}", nms_interface.name, device.name),
            self.netbox_client.query_interfaces(
                &[("device_id", device_id.as_str()), ("name", nms_interface.name.as_str())],
                false,
            ),
        )
        .await?;

        if let Some(interface) = existing.into_iter().next() {
            debug!("Interface {} on {} already exists in NetBox (ID: {})", interface.name, device.name, interface.id);
            return Some(interface);
        }

        let created = attempt(
            &mut self.report,
            &device.name,
            Stage::Interface,
            &format!("create interface {} on {}", nms_interface.name, device.name),
            self.netbox_client.create_interface(
                netbox_device.id,
                &nms_interface.name,
                MGMT_INTERFACE_TYPE,
                nms_interface.descr.as_deref(),
            ),
        )
        .await?;
        info!("Created interface {} on {} in NetBox (ID: {})", created.name, device.name, created.id);
        self.report.created += 1;
        Some(created)
    }

    /// Get-or-create the management IP, correcting its mask in place
    pub(crate) async fn ensure_ip_address(&mut self, device: &NormalizedDevice, cidr: &str) -> Option<IPAddress> {
        // A bare address matches the stored record whatever its mask
        let existing = attempt(
            &mut self.report,
            &device.name,
            Stage::IpAddress,
            &format!("look up IP address {}", device.mgmt_ip),
            self.netbox_client.query_ip_addresses(&[("address", device.mgmt_ip.as_str())], false),
        )
        .await?;

        // The same host can be stored under several masks; only touch one when none matches
        let exact = existing.iter().position(|ip| ip.address == cidr);
        let candidate = match exact {
            Some(index) => existing.into_iter().nth(index),
            None => existing.into_iter().next(),
        };

        match candidate {
            None => {
                let created = attempt(
                    &mut self.report,
                    &device.name,
                    Stage::IpAddress,
                    &format!("create IP address {}", cidr),
                    self.netbox_client.create_ip_address(cidr),
                )
                .await?;
                info!("Created IP address {} in NetBox (ID: {})", created.address, created.id);
                self.report.created += 1;
                Some(created)
            }
            Some(ip) if ip.address == cidr => {
                debug!("IP address {} already exists in NetBox (ID: {})", ip.address, ip.id);
                Some(ip)
            }
            Some(ip) => {
                let patch = IPAddressPatch {
                    address: Some(cidr.to_string()),
                    ..Default::default()
                };
                let updated = attempt(
                    &mut self.report,
                    &device.name,
                    Stage::IpAddress,
                    &format!("correct mask of IP address {} to {}", ip.address, cidr),
                    self.netbox_client.update_ip_address(ip.id, &patch),
                )
                .await?;
                info!("Corrected IP address {} to {} in NetBox (ID: {})", ip.address, updated.address, updated.id);
                self.report.updated += 1;
                Some(updated)
            }
        }
    }

    /// Bind the IP to the management interface unless it is already bound
    pub(crate) async fn assign_ip(
        &mut self,
        device: &NormalizedDevice,
        ip: &IPAddress,
        interface: &Interface,
    ) -> Option<IPAddress> {
        if let Some(assigned_id) = ip.assigned_object_id {
            debug!("IP address {} already assigned (object ID: {})", ip.address, assigned_id);
            return None;
        }

        let patch = IPAddressPatch {
            assigned_object_type: Some(INTERFACE_OBJECT_TYPE.to_string()),
            assigned_object_id: Some(interface.id),
            ..Default::default()
        };
        let updated = attempt(
            &mut self.report,
            &device.name,
            Stage::Assignment,
            &format!("assign IP address {} to interface {}", ip.address, interface.name),
            self.netbox_client.update_ip_address(ip.id, &patch),
        )
        .await?;
        info!("Assigned IP address {} to interface {} on {}", updated.address, interface.name, device.name);
        self.report.updated += 1;
        Some(updated)
    }

    /// Point the device's primary IPv4 at the IP unless one is already set
    pub(crate) async fn ensure_primary_ip(&mut self, device: &NormalizedDevice, netbox_device: &Device, ip: &IPAddress) {
        // Re-read: the device stage may have been skipped for an existing record
        let device_id = netbox_device.id.to_string();
        let Some(current) = attempt(
            &mut self.report,
            &device.name,
            Stage::PrimaryIp,
            &format!("look up device {}", device.name),
            self.netbox_client.query_devices(&[("id", device_id.as_str())], false),
        )
        .await
        .and_then(|devices| devices.into_iter().next()) else {
            return;
        };

        if let Some(primary) = &current.primary_ip4 {
            debug!("Device {} already has primary IPv4 {} (ID: {})", device.name, primary.address, primary.id);
            return;
        }

        let patch = DevicePatch {
            primary_ip4: Some(ip.id),
            ..Default::default()
        };
        if let Some(updated) = attempt(
            &mut self.report,
            &device.name,
            Stage::PrimaryIp,
            &format!("set primary IPv4 of {}", device.name),
            self.netbox_client.update_device(current.id, &patch),
        )
        .await
        {
            info!("Set primary IPv4 of {} to {} (ID: {})", device.name, ip.address, updated.id);
            self.report.updated += 1;
        }
    }
}

fn is_assigned_to(ip: &IPAddress, interface: &Interface) -> bool {
    ip.assigned_object_type.as_deref() == Some(INTERFACE_OBJECT_TYPE) && ip.assigned_object_id == Some(interface.id)
}
