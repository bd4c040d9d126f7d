//! Device reconciler

use super::Reconciler;
use super::dependencies::ResolvedDependencies;
use crate::normalize::NormalizedDevice;
use crate::reconcile_helpers::attempt;
use crate::report::Stage;
use netbox_client::{Device, DevicePatch, NewDevice};
use tracing::{debug, error, info};

/// Status given to devices the sync creates
const NEW_DEVICE_STATUS: &str = "active";

/// Values the sync owns on a device record
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DesiredDevice {
    pub device_type: u64,
    pub role: u64,
    pub site: u64,
    pub manufacturer: u64,
    pub platform: Option<u64>,
    pub serial: Option<String>,
    pub description: Option<String>,
}

impl DesiredDevice {
    fn new_device(&self, name: &str) -> NewDevice {
        NewDevice {
            name: name.to_string(),
            device_type: self.device_type,
            role: self.role,
            site: self.site,
            manufacturer: Some(self.manufacturer),
            platform: self.platform,
            serial: self.serial.clone(),
            description: self.description.clone(),
            status: NEW_DEVICE_STATUS.to_string(),
        }
    }

    /// Fields of `existing` that differ from the desired state.
    ///
    /// Platform, serial and description are only set when the NMS reports
    /// them; the name is never touched.
    pub(crate) fn diff(&self, existing: &Device) -> DevicePatch {
        DevicePatch {
            device_type: (existing.device_type.id != self.device_type).then_some(self.device_type),
            role: (existing.role.id != self.role).then_some(self.role),
            site: (existing.site.id != self.site).then_some(self.site),
            platform: self
                .platform
                .filter(|id| existing.platform.as_ref().map(|p| p.id) != Some(*id)),
            serial: self.serial.clone().filter(|serial| *serial != existing.serial),
            description: self
                .description
                .clone()
                .filter(|description| *description != existing.description),
            primary_ip4: None,
        }
    }
}

impl Reconciler<'_> {
    /// Create the device or bring an existing one up to date.
    ///
    /// Returns the NetBox device when it exists afterwards; `None` abandons
    /// the rest of this device's processing.
    pub(crate) async fn ensure_device(
        &mut self,
        device: &NormalizedDevice,
        dependencies: &ResolvedDependencies,
        serial: Option<String>,
    ) -> Option<Device> {
        let (Some(role), Some(manufacturer), Some(device_type), Some(site)) = (
            dependencies.role,
            dependencies.manufacturer,
            dependencies.device_type,
            dependencies.site,
        ) else {
            let message = format!(
                "Cannot write device {}: unresolved {}",
                device.name,
                dependencies.unresolved().join(", ")
            );
            error!("{}", message);
            self.report.record_issue(&device.name, Stage::Dependency, message);
            return None;
        };

        let desired = DesiredDevice {
            device_type,
            role,
            site,
            manufacturer,
            platform: dependencies.platform,
            serial,
            description: device.location.clone(),
        };

        let existing = attempt(
            &mut self.report,
            &device.name,
            Stage::Device,
            &format!("look up device {}", device.name),
            self.netbox_client.query_devices(&[("name", device.name.as_str())], false),
        )
        .await?;

        // Names are unique per site; prefer the record in the target site
        let existing = existing
            .iter()
            .find(|d| d.site.id == site)
            .or_else(|| existing.first())
            .cloned();

        match existing {
            None => {
                let created = attempt(
                    &mut self.report,
                    &device.name,
                    Stage::Device,
                    &format!("create device {}", device.name),
                    self.netbox_client.create_device(&desired.new_device(&device.name)),
                )
                .await?;
                info!("Created device {} in NetBox (ID: {})", device.name, created.id);
                self.report.created += 1;
                Some(created)
            }
            Some(existing) if !self.config.update_existing => {
                debug!("Device {} exists in NetBox (ID: {}), updates disabled", device.name, existing.id);
                Some(existing)
            }
            Some(existing) => {
                let patch = desired.diff(&existing);
                if patch.is_empty() {
                    debug!("Device {} (ID: {}) already up-to-date in NetBox", device.name, existing.id);
                    return Some(existing);
                }
                let updated = attempt(
                    &mut self.report,
                    &device.name,
                    Stage::Device,
                    &format!("update device {}", device.name),
                    self.netbox_client.update_device(existing.id, &patch),
                )
                .await?;
                info!("Updated device {} in NetBox (ID: {})", device.name, updated.id);
                self.report.updated += 1;
                Some(updated)
            }
        }
    }
}
