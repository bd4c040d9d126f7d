//! Reconciliation of NMS devices into NetBox.
//!
//! Each device runs through the stages in order, and a later stage never
//! runs with identifiers an earlier one failed to resolve:
//! - `dependencies`: role, manufacturer, device type, platform, site
//! - `device`: the device record itself
//! - `interface`: management interface, IP, assignment, primary IPv4

pub mod dependencies;
pub mod device;
pub mod interface;

use crate::cidr::{compose_cidr, resolve_mask};
use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::normalize::{NormalizedDevice, normalize};
use crate::report::{Stage, SyncReport};
use crate::serial::normalize_serial;
use netbox_client::NetBoxClientTrait;
use nms_source::{LOCATION_PROPERTY, NmsSource};
use tracing::{Instrument, Span, error, field, info, info_span, warn};

/// Reconciles one device group from an NMS into NetBox.
pub struct Reconciler<'a> {
    pub(crate) netbox_client: Box<dyn NetBoxClientTrait>,
    pub(crate) source: &'a dyn NmsSource,
    pub(crate) config: &'a SyncConfig,
    pub(crate) report: SyncReport,
}

impl std::fmt::Debug for Reconciler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("netbox_url", &self.netbox_client.base_url())
            .field("device_group", &self.config.device_group)
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}

impl<'a> Reconciler<'a> {
    /// Reconciler with an empty report
    pub fn new(netbox_client: Box<dyn NetBoxClientTrait>, source: &'a dyn NmsSource, config: &'a SyncConfig) -> Self {
        Self {
            netbox_client,
            source,
            config,
            report: SyncReport::new(),
        }
    }

    /// Reconcile every device of the configured group, one at a time, in NMS order.
    ///
    /// Only failing to resolve the group is an error; everything below that
    /// ends up in the report.
    pub async fn reconcile_group(&mut self) -> Result<(), SyncError> {
        let group = &self.config.device_group;
        let device_ids = self.source.device_ids(group).await.map_err(|e| {
            error!("Failed to resolve device group {}: {}", group, e);
            SyncError::Source(e)
        })?;
        info!("Reconciling {} devices of group {} into {}", device_ids.len(), group, self.netbox_client.base_url());

        for device_id in &device_ids {
            let span = info_span!("device", id = %device_id, name = field::Empty);
            self.reconcile_device(device_id).instrument(span).await;
        }

        self.report.finish();
        Ok(())
    }

    /// Hand back the report once the run is over
    pub fn into_report(self) -> SyncReport {
        self.report
    }

    async fn reconcile_device(&mut self, device_id: &str) {
        self.report.devices_seen += 1;

        let Some(device) = self.read_device(device_id).await else {
            self.report.devices_skipped += 1;
            return;
        };

        let mask = self.resolve_mask(&device).await;
        let cidr = compose_cidr(&device.mgmt_ip, &mask);
        let serial = device
            .serial
            .as_deref()
            .map(|raw| normalize_serial(raw, self.config.extracts_serial_for(&device.vendor.name)));

        let dependencies = self.ensure_dependencies(&device).await;
        let Some(netbox_device) = self.ensure_device(&device, &dependencies, serial).await else {
            warn!("Skipping interface and IP of {}: device is not in NetBox", device.name);
            return;
        };

        self.ensure_management_ip(&device, &netbox_device, &cidr).await;
        self.report.devices_reconciled += 1;
    }

    /// Read a device, its site and location from the NMS and normalize it
    async fn read_device(&mut self, device_id: &str) -> Option<NormalizedDevice> {
        let raw = match self.source.device(device_id).await {
            Ok(raw) => raw,
            Err(e) => {
                let message = format!("Failed to read device {} from NMS: {}", device_id, e);
                error!("{}", message);
                self.report.record_issue(device_id, Stage::Source, message);
                return None;
            }
        };

        let name = raw.name.as_deref().filter(|name| !name.trim().is_empty());
        let label = name.unwrap_or(device_id).to_string();
        Span::current().record("name", label.as_str());

        let mut site_name = String::new();
        let mut location = None;
        if let Some(name) = name {
            match self.source.site_name(name).await {
                Ok(site) => site_name = site,
                Err(e) => {
                    let message = format!("Failed to read site of {}, using default site: {}", name, e);
                    warn!("{}", message);
                    self.report.record_issue(&label, Stage::Source, message);
                }
            }
            match self.source.device_property(name, LOCATION_PROPERTY).await {
                Ok(value) => location = value,
                Err(e) => {
                    let message = format!("Failed to read location of {}: {}", name, e);
                    warn!("{}", message);
                    self.report.record_issue(&label, Stage::Source, message);
                }
            }
        }

        match normalize(&raw, &site_name, &self.config.default_site, location.as_deref()) {
            Ok(device) => Some(device),
            Err(missing) => {
                let message = format!("Skipping device {}: {}", label, missing);
                error!("{}", message);
                self.report.record_issue(&label, Stage::Validation, message);
                None
            }
        }
    }

    /// Mask of the management IP; lookup failures fall back to the default
    async fn resolve_mask(&self, device: &NormalizedDevice) -> String {
        match self.source.one_ip_entries(&device.mgmt_ip).await {
            Ok(entries) => resolve_mask(&entries, &self.config.default_mask),
            Err(e) => {
                warn!("Failed to read one-IP table for {}, using default mask: {}", device.mgmt_ip, e);
                self.config.default_mask.clone()
            }
        }
    }
}
